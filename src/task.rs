use crate::scoring::ScoreResult;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// A user-defined practice goal: reach `target_speed_wpm` within `time_limit_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub time_limit_seconds: u64,
    pub target_speed_wpm: u32,
}

#[derive(Debug)]
pub enum TaskFileError {
    Io(io::Error),
    /// `line` is 1-based
    MalformedTaskFile { line: usize, reason: String },
}

impl fmt::Display for TaskFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFileError::Io(e) => write!(f, "unable to read task file: {}", e),
            TaskFileError::MalformedTaskFile { line, reason } => {
                write!(f, "malformed task file at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for TaskFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskFileError::Io(e) => Some(e),
            TaskFileError::MalformedTaskFile { .. } => None,
        }
    }
}

impl From<io::Error> for TaskFileError {
    fn from(e: io::Error) -> Self {
        TaskFileError::Io(e)
    }
}

impl Task {
    pub fn new(time_limit_seconds: u64, target_speed_wpm: u32) -> Self {
        Self {
            time_limit_seconds,
            target_speed_wpm,
        }
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }

    pub fn is_met(&self, result: &ScoreResult) -> bool {
        result.speed_wpm >= self.target_speed_wpm as f64
    }

    /// Parse the first two lines as time limit (seconds) and target speed (wpm)
    pub fn parse(contents: &str) -> Result<Self, TaskFileError> {
        let mut lines = contents.lines();
        let time_limit_seconds = parse_line(lines.next(), 1)?;
        let target_speed_wpm = parse_line(lines.next(), 2)?;

        Ok(Self {
            time_limit_seconds,
            target_speed_wpm,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TaskFileError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.time_limit_seconds)?;
        writeln!(f, "{}", self.target_speed_wpm)
    }
}

fn parse_line<T: std::str::FromStr>(line: Option<&str>, number: usize) -> Result<T, TaskFileError>
where
    T::Err: fmt::Display,
{
    let raw = line.ok_or_else(|| TaskFileError::MalformedTaskFile {
        line: number,
        reason: "missing".to_string(),
    })?;

    raw.trim()
        .parse::<T>()
        .map_err(|e| TaskFileError::MalformedTaskFile {
            line: number,
            reason: format!("{:?}: {}", raw, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid() {
        let task = Task::parse("30\n40").unwrap();
        assert_eq!(task, Task::new(30, 40));
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_extra_lines() {
        let task = Task::parse(" 60 \r\n25\nignored\n").unwrap();
        assert_eq!(task, Task::new(60, 25));
    }

    #[test]
    fn test_parse_not_an_integer() {
        assert_matches!(
            Task::parse("abc\n40"),
            Err(TaskFileError::MalformedTaskFile { line: 1, .. })
        );
        assert_matches!(
            Task::parse("30\nfast"),
            Err(TaskFileError::MalformedTaskFile { line: 2, .. })
        );
    }

    #[test]
    fn test_parse_missing_lines() {
        assert_matches!(
            Task::parse(""),
            Err(TaskFileError::MalformedTaskFile { line: 1, .. })
        );
        assert_matches!(
            Task::parse("30"),
            Err(TaskFileError::MalformedTaskFile { line: 2, .. })
        );
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert_matches!(
            Task::parse("-5\n40"),
            Err(TaskFileError::MalformedTaskFile { line: 1, .. })
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert_matches!(
            Task::load(dir.path().join("nope.txt")),
            Err(TaskFileError::Io(_))
        );
    }

    #[test]
    fn test_save_writes_two_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks").join("goal.txt");

        Task::new(45, 70).save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "45\n70\n");
        assert_eq!(Task::load(&path).unwrap(), Task::new(45, 70));
    }

    #[test]
    fn test_is_met() {
        let task = Task::new(30, 40);
        let fast = ScoreResult {
            speed_wpm: 40.0,
            accuracy_pct: 90.0,
        };
        let slow = ScoreResult {
            speed_wpm: 39.99,
            accuracy_pct: 100.0,
        };

        assert!(task.is_met(&fast));
        assert!(!task.is_met(&slow));
    }
}
