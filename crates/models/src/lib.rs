pub mod errors;
pub mod db;
pub mod test_row;
pub mod album;
