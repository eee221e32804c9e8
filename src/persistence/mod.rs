//! Level persistence
//!
//! Levels are numbered text files (`lvl1.txt`, `lvl2.txt`, ...) in one
//! directory. Discovery stops at the first gap.

pub mod level_file;

pub use level_file::LevelFile;

use std::path::{Path, PathBuf};

/// `lvl<N>`, optionally with the `.txt` extension
pub fn level_file_name(n: u32, with_extension: bool) -> String {
    if with_extension {
        format!("lvl{}.txt", n)
    } else {
        format!("lvl{}", n)
    }
}

pub fn level_path(dir: &Path, n: u32) -> PathBuf {
    dir.join(level_file_name(n, true))
}

/// Count consecutive level files starting at 1, up to `cap`
pub fn scan_levels(dir: &Path, cap: u32) -> u32 {
    let mut count = 0;
    while count < cap && level_path(dir, count + 1).is_file() {
        count += 1;
    }

    log::info!("{} level(s) found in {}", count, dir.display());
    if count == cap {
        log::warn!("Level limit reached ({}), some levels may not be listed", cap);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("charge-game-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_level_file_name() {
        assert_eq!(level_file_name(3, true), "lvl3.txt");
        assert_eq!(level_file_name(12, false), "lvl12");
        assert_eq!(level_path(Path::new("levels"), 1), Path::new("levels").join("lvl1.txt"));
    }

    #[test]
    fn test_scan_stops_at_gap() {
        let dir = temp_dir("scan-gap");
        for n in [1, 2, 4] {
            std::fs::write(level_path(&dir, n), "-1 -1 -1\n0 0 0 0\n0 0 0\n").unwrap();
        }
        assert_eq!(scan_levels(&dir, 42), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_respects_cap() {
        let dir = temp_dir("scan-cap");
        for n in 1..=5 {
            std::fs::write(level_path(&dir, n), "").unwrap();
        }
        assert_eq!(scan_levels(&dir, 3), 3);
        assert_eq!(scan_levels(&dir, 42), 5);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = std::env::temp_dir().join("charge-game-does-not-exist");
        assert_eq!(scan_levels(&dir, 42), 0);
    }
}
