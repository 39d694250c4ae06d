use time::OffsetDateTime;

/// Fits `text` into a display line of `width` characters: centered, padded with spaces, and cut
/// off if too long.
pub fn fit_line(text: &str, width: usize) -> String {
    let text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

/// Formats the time of day as `HH:MM:SS`.
pub fn format_clock(now: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_line_centers_and_pads() {
        assert_eq!(fit_line("abc", 8), "  abc   ");
        assert_eq!(fit_line("", 4), "    ");
        assert_eq!(fit_line("exactly16chars!!", 16), "exactly16chars!!");
    }

    #[test]
    fn fit_line_truncates() {
        assert_eq!(fit_line("a very long host name", 16), "a very long host");
    }

    #[test]
    fn clock_is_zero_padded() {
        let time = OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(3723);
        assert_eq!(format_clock(time), "01:02:03");
    }
}
