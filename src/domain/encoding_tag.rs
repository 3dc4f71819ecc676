use std::fmt;
use std::str::FromStr;

/// Audio container labels accepted by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingTag {
    #[default]
    Webm,
    Wav,
    Mp3,
    Ogg,
    Mp4,
}

impl EncodingTag {
    pub const ALL: [EncodingTag; 5] = [
        EncodingTag::Webm,
        EncodingTag::Wav,
        EncodingTag::Mp3,
        EncodingTag::Ogg,
        EncodingTag::Mp4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingTag::Webm => "webm",
            EncodingTag::Wav => "wav",
            EncodingTag::Mp3 => "mp3",
            EncodingTag::Ogg => "ogg",
            EncodingTag::Mp4 => "mp4",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            EncodingTag::Webm => "audio/webm",
            EncodingTag::Wav => "audio/wav",
            EncodingTag::Mp3 => "audio/mpeg",
            EncodingTag::Ogg => "audio/ogg",
            EncodingTag::Mp4 => "audio/mp4",
        }
    }
}

impl FromStr for EncodingTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "webm" => Ok(EncodingTag::Webm),
            "wav" => Ok(EncodingTag::Wav),
            "mp3" => Ok(EncodingTag::Mp3),
            "ogg" => Ok(EncodingTag::Ogg),
            "mp4" => Ok(EncodingTag::Mp4),
            _ => Err(format!("Invalid encoding tag: {}", s)),
        }
    }
}

impl fmt::Display for EncodingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
