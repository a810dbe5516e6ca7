//! Local filename derivation from an original reference string.

/// Returns the text after the final `/` of `reference`, or `None` when that is
/// empty or one of the reserved names `.` / `..`.
///
/// Works on the reference exactly as written in the markup (no resolution, no
/// query stripping), so `img/a.png?v=1` yields `a.png?v=1`.
pub fn last_segment(reference: &str) -> Option<&str> {
    let segment = reference.rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}
