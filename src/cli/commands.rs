//! # Commands Module / 命令模块
//!
//! One module per subcommand.
//! 每个子命令一个模块。

pub mod init;
pub mod inspect;
pub mod packs;
pub mod scan;
