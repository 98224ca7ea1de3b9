//! Search strategy for Windows DLLs.

use std::path::PathBuf;

use crate::constants::WINDOWS_PATH_VAR;
use crate::env::SearchEnv;
use crate::platform::Platform;

#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsStrategy;

impl WindowsStrategy {
    /// Each `PATH` directory combined with each DLL naming convention.
    pub fn candidates(&self, short_name: &str, env: &SearchEnv) -> Vec<PathBuf> {
        let file_names = Platform::Windows.library_file_names(short_name);
        env.path_list(WINDOWS_PATH_VAR, ';')
            .into_iter()
            .flat_map(|dir| {
                file_names
                    .iter()
                    .map(move |file| dir.join(file))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
