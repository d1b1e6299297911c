//! Line diff between a rendered document and the one on disk

use std::fmt;
use std::path::PathBuf;

/// One line of a diff
///
/// Lines keep their line ending, so `"a\r\n"`, `"a\n"` and a final `"a"`
/// without newline are all different lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Equal(String),
    Added(String),
    Removed(String),
}

impl DiffLine {
    /// The line as it appears in the file, including its line ending
    pub fn text(&self) -> &str {
        match self {
            DiffLine::Equal(line) | DiffLine::Added(line) | DiffLine::Removed(line) => line,
        }
    }
}

/// Longest-common-subsequence diff of two texts, line by line
///
/// The common prefix and suffix are matched directly; only the lines in
/// between go through the quadratic table.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let old: Vec<&str> = old.split_inclusive('\n').collect();
    let new: Vec<&str> = new.split_inclusive('\n').collect();

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let equal = |line: &&str| DiffLine::Equal(line.to_string());
    let mut lines: Vec<DiffLine> = old[..prefix].iter().map(equal).collect();
    lines.extend(lcs_diff(
        &old[prefix..old.len() - suffix],
        &new[prefix..new.len() - suffix],
    ));
    lines.extend(old[old.len() - suffix..].iter().map(equal));
    lines
}

fn lcs_diff(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    // lcs[i][j]: common subsequence length of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut lines = Vec::with_capacity(old.len().max(new.len()));
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            lines.push(DiffLine::Equal(old[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            lines.push(DiffLine::Removed(old[i].to_string()));
            i += 1;
        } else {
            lines.push(DiffLine::Added(new[j].to_string()));
            j += 1;
        }
    }
    lines.extend(old[i..].iter().map(|l| DiffLine::Removed(l.to_string())));
    lines.extend(new[j..].iter().map(|l| DiffLine::Added(l.to_string())));
    lines
}

/// Difference between the document on disk and a fresh rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub lines: Vec<DiffLine>,
}

impl FileDiff {
    pub fn new(path: impl Into<PathBuf>, old: &str, new: &str) -> Self {
        Self {
            path: path.into(),
            lines: diff_lines(old, new),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.lines.iter().any(|l| !matches!(l, DiffLine::Equal(_)))
    }

    /// Changed lines only
    pub fn changes(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| !matches!(l, DiffLine::Equal(_)))
    }
}

/// Prints the line without its `\n`; a carriage return shows as `\r` and a
/// missing final newline gets a marker line
impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            DiffLine::Equal(_) => ' ',
            DiffLine::Added(_) => '+',
            DiffLine::Removed(_) => '-',
        };
        let text = self.text();

        match text.strip_suffix('\n') {
            Some(line) => match line.strip_suffix('\r') {
                Some(line) => write!(f, "{}{}\\r", sign, line),
                None => write!(f, "{}{}", sign, line),
            },
            None => write!(f, "{}{}\n\\ No newline at end of file", sign, text),
        }
    }
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {}", self.path.display())?;
        writeln!(f, "+++ {}", self.path.display())?;
        for line in self.changes() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_texts_have_no_changes() {
        let diff = FileDiff::new("README.md", "a\nb\n", "a\nb\n");
        assert!(!diff.is_changed());
        assert_eq!(diff.lines.len(), 2);
    }

    #[test]
    fn replaced_line() {
        assert_eq!(
            diff_lines("a\nb\nc\n", "a\nx\nc\n"),
            vec![
                DiffLine::Equal("a\n".to_string()),
                DiffLine::Removed("b\n".to_string()),
                DiffLine::Added("x\n".to_string()),
                DiffLine::Equal("c\n".to_string()),
            ]
        );
    }

    #[test]
    fn missing_file_is_all_additions() {
        let diff = FileDiff::new("users.md", "", "# users\n\nbody\n");
        assert!(diff.is_changed());
        assert!(diff.lines.iter().all(|l| matches!(l, DiffLine::Added(_))));
        assert_eq!(
            diff.to_string(),
            "--- users.md\n+++ users.md\n+# users\n+\n+body\n"
        );
    }

    #[test]
    fn line_endings_are_significant() {
        let crlf = FileDiff::new("a.md", "x\r\ny\r\n", "x\ny\n");
        assert!(crlf.is_changed());
        assert_eq!(
            crlf.to_string(),
            "--- a.md\n+++ a.md\n-x\\r\n-y\\r\n+x\n+y\n"
        );

        let no_final_newline = FileDiff::new("a.md", "x\ny", "x\ny\n");
        assert_eq!(
            no_final_newline.changes().cloned().collect::<Vec<_>>(),
            vec![DiffLine::Removed("y".to_string()), DiffLine::Added("y\n".to_string())]
        );
        assert_eq!(
            no_final_newline.to_string(),
            "--- a.md\n+++ a.md\n-y\n\\ No newline at end of file\n+y\n"
        );
    }

    #[test]
    fn common_prefix_and_suffix_stay_equal() {
        let old: String = (0..1000).map(|i| format!("line {}\n", i)).collect();
        let new = old.replace("line 500\n", "line five hundred\n");

        let diff = diff_lines(&old, &new);
        assert_eq!(diff.len(), 1001);
        assert_eq!(
            diff.iter().filter(|l| !matches!(l, DiffLine::Equal(_))).cloned().collect::<Vec<_>>(),
            vec![
                DiffLine::Removed("line 500\n".to_string()),
                DiffLine::Added("line five hundred\n".to_string()),
            ]
        );
    }
}
