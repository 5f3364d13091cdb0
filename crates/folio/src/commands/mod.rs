pub mod dev;
pub mod generate;
pub mod init;
pub mod serve;
