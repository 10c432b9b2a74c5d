pub mod config_path;
pub mod logout;
pub mod whoami;
