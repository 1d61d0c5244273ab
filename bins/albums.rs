fn main() -> std::process::ExitCode {
    server::launch(server::Service::Albums)
}
