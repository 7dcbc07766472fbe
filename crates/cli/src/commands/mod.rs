pub mod complete;
pub mod flow;
pub mod init;
pub mod root;

pub use complete::complete_command;
pub use flow::{FlowOptions, flow_command};
pub use init::init_command;
pub use root::root_command;
