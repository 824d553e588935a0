//! `subsync inspect`: show what an artifact on disk contains.

use anyhow::Result;
use std::path::Path;
use subsync_core::artifact;

pub fn run_inspect(path: &Path) -> Result<bool> {
    match artifact::inspect(path)? {
        Some(info) => {
            println!("Title:   {}", info.header.title);
            println!("Source:  {}", info.header.url);
            println!("Updated: {}", info.header.updated);
            println!("Configs: {}", info.lines);
            println!("SHA-256: {}", info.digest);
            Ok(true)
        }
        None => {
            println!("{} is not a subsync artifact", path.display());
            Ok(false)
        }
    }
}
