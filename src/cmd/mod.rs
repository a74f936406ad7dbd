pub mod grid;
pub mod init;
pub mod locale;
pub mod root;
pub mod select;
