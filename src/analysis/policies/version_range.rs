use std::cmp::Ordering;
use std::fmt;

/// Qualifiers with a fixed rank; any other text part ranks as 0.
const SPECIAL_MEANINGS: [(&str, i32); 3] = [("dev", -1), ("rc", 1), ("final", 2)];

/// One end of an interval range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: String,
    pub inclusive: bool,
}

/// An Ivy-style dynamic version declaration.
///
/// Two forms are supported:
/// - intervals such as `[1.0,2.0]`, `[1.0,2.0)`, `]1.0,2.0[`, `[1.0,)` and `(,2.0]`
/// - sub-revision patterns such as `1.0.+`, where `+` alone matches anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    Interval {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
    SubRevision { prefix: String },
}

impl VersionRange {
    /// Parses a range declaration, returning `None` for plain versions.
    pub fn parse(declaration: &str) -> Option<Self> {
        let declaration = declaration.trim();

        if let Some(prefix) = declaration.strip_suffix('+') {
            return Some(VersionRange::SubRevision {
                prefix: prefix.to_string(),
            });
        }

        let mut chars = declaration.chars();
        let first = chars.next()?;
        let last = chars.next_back()?;
        if !matches!(first, '[' | ']' | '(') || !matches!(last, '[' | ']' | ')') {
            return None;
        }

        let inner = &declaration[first.len_utf8()..declaration.len() - last.len_utf8()];
        let (lower, upper) = inner.split_once(',')?;
        if upper.contains(',') {
            return None;
        }

        let lower = lower.trim();
        let upper = upper.trim();
        if lower.is_empty() && upper.is_empty() {
            return None;
        }

        let lower = (!lower.is_empty()).then(|| Bound {
            version: lower.to_string(),
            inclusive: first == '[',
        });
        let upper = (!upper.is_empty()).then(|| Bound {
            version: upper.to_string(),
            inclusive: last == ']',
        });

        Some(VersionRange::Interval { lower, upper })
    }

    /// Whether the concrete `version` lies within this range.
    pub fn contains(&self, version: &str) -> bool {
        match self {
            VersionRange::SubRevision { prefix } => version.starts_with(prefix.as_str()),
            VersionRange::Interval { lower, upper } => {
                let above_lower = lower.as_ref().map_or(true, |bound| {
                    match compare_versions(version, &bound.version) {
                        Ordering::Greater => true,
                        Ordering::Equal => bound.inclusive,
                        Ordering::Less => false,
                    }
                });
                let below_upper = upper.as_ref().map_or(true, |bound| {
                    match compare_versions(version, &bound.version) {
                        Ordering::Less => true,
                        Ordering::Equal => bound.inclusive,
                        Ordering::Greater => false,
                    }
                });
                above_lower && below_upper
            }
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::SubRevision { prefix } => write!(f, "{}+", prefix),
            VersionRange::Interval { lower, upper } => {
                let open = match lower {
                    Some(bound) if bound.inclusive => '[',
                    _ => '(',
                };
                let close = match upper {
                    Some(bound) if bound.inclusive => ']',
                    _ => ')',
                };
                write!(
                    f,
                    "{}{},{}{}",
                    open,
                    lower.as_ref().map_or("", |b| b.version.as_str()),
                    upper.as_ref().map_or("", |b| b.version.as_str()),
                    close
                )
            }
        }
    }
}

/// Whether a declared version (possibly a range) applies to a concrete version.
///
/// Equal strings always apply. Otherwise the declaration has to be a range
/// containing `actual`; a plain, non-equal version never applies.
pub fn is_applicable_ivy_version(declared: &str, actual: &str) -> bool {
    if declared == actual {
        return true;
    }

    VersionRange::parse(declared).is_some_and(|range| range.contains(actual))
}

/// Orders two versions the way Ivy's latest-revision strategy does.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts_a = split_version(a);
    let parts_b = split_version(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        if pa == pb {
            continue;
        }

        let a_numeric = is_numeric(pa);
        let b_numeric = is_numeric(pb);
        match (a_numeric, b_numeric) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (true, true) => {
                let ordering = compare_numeric(pa, pb);
                if ordering != Ordering::Equal {
                    return ordering;
                }
                continue;
            }
            (false, false) => {}
        }

        let special_a = special_meaning(pa);
        let special_b = special_meaning(pb);
        if special_a.is_some() || special_b.is_some() {
            return special_a.unwrap_or(0).cmp(&special_b.unwrap_or(0));
        }

        return pa.cmp(pb);
    }

    match parts_a.len().cmp(&parts_b.len()) {
        Ordering::Greater if is_numeric(&parts_a[parts_b.len()]) => Ordering::Greater,
        Ordering::Greater => Ordering::Less,
        Ordering::Less if is_numeric(&parts_b[parts_a.len()]) => Ordering::Less,
        Ordering::Less => Ordering::Greater,
        Ordering::Equal => Ordering::Equal,
    }
}

/// Splits at `.`, `-`, `_`, `+` and at every letter/digit boundary.
fn split_version(version: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for c in version.chars() {
        if matches!(c, '.' | '-' | '_' | '+') {
            parts.push(std::mem::take(&mut current));
            previous = None;
            continue;
        }

        if let Some(p) = previous {
            let boundary = (p.is_ascii_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_ascii_alphabetic());
            if boundary {
                parts.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
        previous = Some(c);
    }
    parts.push(current);

    parts
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn special_meaning(part: &str) -> Option<i32> {
    let lower = part.to_ascii_lowercase();
    SPECIAL_MEANINGS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rank)| *rank)
}
