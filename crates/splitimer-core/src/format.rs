/// Format seconds as `mm:ss`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
