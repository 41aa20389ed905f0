use std::cmp::Ordering;

/// PackageManagerPriority policy for deciding which package manager owns a file
///
/// When the globs of several package managers match the same definition file,
/// exactly one of them may process it. The operator declares an order of
/// package manager names; names not mentioned follow in case-insensitive
/// alphabetical order. The result is a total order over all names.
#[derive(Debug, Clone, Default)]
pub struct PackageManagerPriority {
    declared: Vec<String>,
}

impl PackageManagerPriority {
    pub fn new(declared: Vec<String>) -> Self {
        Self { declared }
    }

    /// Position of `name` in the declared order, compared case-insensitively.
    fn declared_rank(&self, name: &str) -> Option<usize> {
        self.declared
            .iter()
            .position(|declared| declared.eq_ignore_ascii_case(name))
    }

    /// Compares two package manager names; `Less` means higher priority.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.declared_rank(a), self.declared_rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }

    /// Sorts names from highest to lowest priority.
    pub fn sort<S: AsRef<str>>(&self, names: &mut [S]) {
        names.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Picks the highest-priority name among the candidates.
    pub fn preferred<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .min_by(|a, b| self.compare(a, b))
    }
}
