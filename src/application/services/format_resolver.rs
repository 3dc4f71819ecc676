use crate::domain::EncodingTag;

const CONTENT_TYPE_MARKERS: [(&str, EncodingTag); 4] = [
    ("webm", EncodingTag::Webm),
    ("wav", EncodingTag::Wav),
    ("mpeg", EncodingTag::Mp3),
    ("ogg", EncodingTag::Ogg),
];

const FILENAME_EXTENSIONS: [(&str, EncodingTag); 5] = [
    (".webm", EncodingTag::Webm),
    (".wav", EncodingTag::Wav),
    (".mp3", EncodingTag::Mp3),
    (".ogg", EncodingTag::Ogg),
    (".mp4", EncodingTag::Mp4),
];

/// Picks the encoding to declare for an upload. The content type wins over the
/// filename; anything unrecognised falls back to `webm`.
pub fn resolve_encoding(content_type: &str, filename: &str) -> EncodingTag {
    let content_type = content_type.to_ascii_lowercase();
    if let Some((_, tag)) = CONTENT_TYPE_MARKERS
        .iter()
        .find(|(marker, _)| content_type.contains(marker))
    {
        return *tag;
    }

    let filename = filename.to_ascii_lowercase();
    FILENAME_EXTENSIONS
        .iter()
        .find(|(ext, _)| filename.ends_with(ext))
        .map(|(_, tag)| *tag)
        .unwrap_or_default()
}
