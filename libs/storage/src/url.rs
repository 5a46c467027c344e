/// Join a public base URL with a folder and object name.
///
/// Keeps exactly one slash between each segment regardless of how the
/// configured base or folder are written.
pub fn join_public_url(base: &str, folder: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        format!("{base}/{name}")
    } else {
        format!("{base}/{folder}/{name}")
    }
}
