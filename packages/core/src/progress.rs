/// Progress assigned to any status outside the known lifecycle values
pub const DEFAULT_PROGRESS: u8 = 25;

/// Map a lifecycle status onto a 0-100 progress value.
///
/// Matching is exact but case-insensitive. Unknown, empty and absent statuses
/// all land in the "partially progressed" bucket rather than failing.
pub fn progress_for_status(status: Option<&str>) -> u8 {
    let Some(status) = status else {
        return DEFAULT_PROGRESS;
    };

    match status.to_lowercase().as_str() {
        "approved" => 100,
        "amendments required" => 75,
        "pending" => 50,
        "rejected" => 0,
        _ => DEFAULT_PROGRESS,
    }
}
