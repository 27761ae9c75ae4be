pub mod grade;
pub mod init;
