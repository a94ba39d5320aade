//! Progress events parsed from yt-dlp output

use std::path::PathBuf;

/// Transfer progress for the file currently being downloaded
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// 0.0 to 100.0
    pub percentage: f64,
    /// 0 when yt-dlp does not know the size
    pub total_bytes: u64,
    /// bytes per second
    pub speed: f64,
}

/// Events reported while a download runs
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    /// The transcoder was located; the transfer is about to start
    TranscoderLocated(PathBuf),
    Progress(DownloadProgress),
    /// One stream finished transferring (or was already on disk)
    Finished,
    /// Separate streams are being merged into the final container
    Merging(PathBuf),
}

/// Parse a single line of yt-dlp output (run with `--newline`).
///
/// Recognised shapes:
/// - `[download]  42.5% of ~ 150.00MiB at  5.20MiB/s ETA 00:15`
/// - `[download] 100% of   10.50MiB in 00:00:02 at 4.20MiB/s`
/// - `[download] clip.mp4 has already been downloaded`
/// - `[Merger] Merging formats into "clip.mp4"`
pub fn parse_line(line: &str) -> Option<DownloadEvent> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix("[Merger]") {
        let target = rest.trim().strip_prefix("Merging formats into")?;
        return Some(DownloadEvent::Merging(PathBuf::from(
            target.trim().trim_matches('"'),
        )));
    }

    let body = line.strip_prefix("[download]")?.trim();
    if body.ends_with("has already been downloaded") {
        return Some(DownloadEvent::Finished);
    }

    let progress = parse_progress(body)?;
    // the closing summary line carries no ETA
    if progress.percentage >= 100.0 && !body.contains("ETA") {
        Some(DownloadEvent::Finished)
    } else {
        Some(DownloadEvent::Progress(progress))
    }
}

fn parse_progress(body: &str) -> Option<DownloadProgress> {
    let (pct, rest) = body.split_once('%')?;
    let percentage = pct.trim().parse::<f64>().ok()?;

    let total_bytes = rest
        .split_once(" of ")
        .and_then(|(_, after)| {
            after
                .trim_start()
                .trim_start_matches('~')
                .split_whitespace()
                .next()
        })
        .and_then(parse_size)
        .unwrap_or(0);

    let speed = rest
        .split_once(" at ")
        .and_then(|(_, after)| after.split_whitespace().next())
        .and_then(|token| token.strip_suffix("/s"))
        .and_then(parse_size)
        .map(|bytes| bytes as f64)
        .unwrap_or(0.0);

    Some(DownloadProgress {
        percentage,
        total_bytes,
        speed,
    })
}

/// Parse sizes such as `10.50MiB`, `512KiB` or `3MB` into bytes
fn parse_size(token: &str) -> Option<u64> {
    let split = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let (number, unit) = token.split_at(split);
    let value = number.parse::<f64>().ok()?;

    let multiplier: f64 = match unit {
        "B" => 1.0,
        "KiB" => 1024.0,
        "MiB" => 1024.0 * 1024.0,
        "GiB" => 1024.0 * 1024.0 * 1024.0,
        "TiB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        "KB" | "kB" => 1_000.0,
        "MB" => 1_000_000.0,
        "GB" => 1_000_000_000.0,
        "TB" => 1_000_000_000_000.0,
        _ => return None,
    };

    Some((value * multiplier).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_in_flight_progress() {
        let event = parse_line("[download]  42.5% of ~ 150.00MiB at  5.20MiB/s ETA 00:15");
        match event {
            Some(DownloadEvent::Progress(p)) => {
                assert_eq!(p.percentage, 42.5);
                assert_eq!(p.total_bytes, 157_286_400);
                assert_eq!(p.speed, (5.2_f64 * 1024.0 * 1024.0).round());
            }
            other => panic!("expected progress, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_speed() {
        let event = parse_line("[download]   0.0% of 10.00MiB at Unknown B/s ETA Unknown");
        match event {
            Some(DownloadEvent::Progress(p)) => {
                assert_eq!(p.percentage, 0.0);
                assert_eq!(p.total_bytes, 10_485_760);
                assert_eq!(p.speed, 0.0);
            }
            other => panic!("expected progress, got {:?}", other),
        }
    }

    #[test]
    fn test_hundred_percent_with_eta_is_still_progress() {
        let event = parse_line("[download] 100.0% of 1.00MiB at 2.00MiB/s ETA 00:00");
        assert!(matches!(event, Some(DownloadEvent::Progress(_))));
    }

    #[test]
    fn test_parse_finished_summary() {
        let event = parse_line("[download] 100% of   10.50MiB in 00:00:02 at 4.20MiB/s");
        assert_eq!(event, Some(DownloadEvent::Finished));
    }

    #[test]
    fn test_parse_already_downloaded() {
        let event = parse_line("[download] /videos/clip.mp4 has already been downloaded");
        assert_eq!(event, Some(DownloadEvent::Finished));
    }

    #[test]
    fn test_parse_merger_line() {
        let event = parse_line("[Merger] Merging formats into \"/videos/clip.mkv\"");
        assert_eq!(
            event,
            Some(DownloadEvent::Merging(PathBuf::from("/videos/clip.mkv")))
        );
    }

    #[test]
    fn test_ignores_unrelated_lines() {
        assert_eq!(parse_line("[youtube] abc123: Downloading webpage"), None);
        assert_eq!(
            parse_line("[download] Destination: /videos/50% off.f137.mp4"),
            None
        );
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512B"), Some(512));
        assert_eq!(parse_size("2KiB"), Some(2048));
        assert_eq!(parse_size("1.5GB"), Some(1_500_000_000));
        assert_eq!(parse_size("Unknown"), None);
        assert_eq!(parse_size("12parsecs"), None);
    }
}
