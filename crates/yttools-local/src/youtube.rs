//! YouTube URL handling and caption text flattening.
//!
//! `video_id` is a total function: malformed URLs, unrecognized hosts, and
//! missing query parameters all degrade to `None`, never to an error.

pub fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "www.youtube.com" || h == "m.youtube.com"
}

/// Extract the video identifier from the URL shapes YouTube hands out:
/// `youtu.be/<id>`, `youtube.com/watch?v=<id>`, `/embed/<id>`, `/v/<id>`.
pub fn video_id(raw: &str) -> Option<String> {
    let u = url::Url::parse(raw).ok()?;
    let host = u.host_str()?.to_ascii_lowercase();

    // youtu.be/<id>
    if host == "youtu.be" {
        let seg = u.path_segments()?.next()?.trim();
        if seg.is_empty() {
            return None;
        }
        return Some(seg.to_string());
    }

    if !is_youtube_host(&host) {
        return None;
    }

    // youtube.com/watch?v=<id>
    if u.path() == "/watch" {
        return u
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty());
    }

    // youtube.com/embed/<id>, youtube.com/v/<id>
    let mut segs = u.path_segments()?;
    if let (Some("embed" | "v"), Some(id)) = (segs.next(), segs.next()) {
        let id = id.trim();
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}

/// Flatten WebVTT caption text to a single transcript line.
///
/// Drops blank lines, the `WEBVTT`/`Kind:`/`Language:` header lines, pure
/// numeric cue ids, and timing lines (anything containing `-->`). Surviving
/// cue text has intra-line whitespace collapsed and is joined with single
/// spaces, capped at `max_chars`.
pub fn flatten_vtt(vtt: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for line in vtt.lines() {
        let l = line.trim();
        if l.is_empty() {
            continue;
        }
        if l.eq_ignore_ascii_case("webvtt") || l.starts_with("Kind:") || l.starts_with("Language:")
        {
            continue;
        }
        if l.contains("-->") {
            continue;
        }
        if l.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        let cleaned = l.split_whitespace().collect::<Vec<_>>().join(" ");
        out.push_str(&cleaned);
        if out.chars().count() >= max_chars {
            break;
        }
    }
    out
}
