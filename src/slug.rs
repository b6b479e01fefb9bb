//! Problem identity: the slug is the last path segment of a problem URL, ignoring one trailing slash.

/// Extract the slug from a problem URL.
///
/// `https://leetcode.com/problems/two-sum/` and `https://leetcode.com/problems/two-sum`
/// both yield `two-sum`. Only a single trailing slash is dropped, so `.../two-sum//` yields `""`.
pub fn extract_slug(url: &str) -> &str {
  let trimmed = url.strip_suffix('/').unwrap_or(url);
  trimmed.rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_url_yields_last_segment() {
    assert_eq!(extract_slug("https://leetcode.com/problems/two-sum"), "two-sum");
  }

  #[test]
  fn trailing_slash_is_ignored() {
    for url in [
      "https://leetcode.com/problems/number-of-islands",
      "https://leetcode.com/problems/clone-graph",
      "problems/course-schedule",
      "a",
    ] {
      let with_slash = format!("{url}/");
      assert_eq!(extract_slug(&with_slash), extract_slug(url), "url = {url}");
    }
  }

  #[test]
  fn degenerate_inputs_are_deterministic() {
    assert_eq!(extract_slug(""), "");
    assert_eq!(extract_slug("/"), "");
    assert_eq!(extract_slug("two-sum"), "two-sum");
    // Only one trailing slash is dropped.
    assert_eq!(extract_slug("https://leetcode.com/problems/two-sum//"), "");
  }
}
