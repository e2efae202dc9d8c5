//! # Packs Command Module / 语言包命令模块
//!
//! Lists the installed language packs.
//! 列出已安装的语言包。

use anyhow::Result;

use crate::infra::packages;
use crate::reporting::console;

pub async fn execute(locale: &str) -> Result<()> {
    let installed = packages::list_installed_langpacks().await;
    console::print_packages(&installed, locale);
    Ok(())
}
