use std::fmt;

/// Stems written by the separation model, before post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceStem {
    Drums,
    Bass,
    Other,
    Vocals,
    Guitar,
    Piano,
}

impl SourceStem {
    /// Guaranteed to exist after a successful separation run.
    pub const REQUIRED: [SourceStem; 4] = [
        SourceStem::Drums,
        SourceStem::Bass,
        SourceStem::Vocals,
        SourceStem::Other,
    ];

    /// Folded into the final "other" stem, in mix input order.
    pub const MELODIC: [SourceStem; 3] = [SourceStem::Guitar, SourceStem::Piano, SourceStem::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStem::Drums => "drums",
            SourceStem::Bass => "bass",
            SourceStem::Other => "other",
            SourceStem::Vocals => "vocals",
            SourceStem::Guitar => "guitar",
            SourceStem::Piano => "piano",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.as_str())
    }
}

impl fmt::Display for SourceStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five stems handed back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StemName {
    Kick,
    Drums,
    Bass,
    Vocals,
    Other,
}

impl StemName {
    pub const ALL: [StemName; 5] = [
        StemName::Kick,
        StemName::Drums,
        StemName::Bass,
        StemName::Vocals,
        StemName::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StemName::Kick => "kick",
            StemName::Drums => "drums",
            StemName::Bass => "bass",
            StemName::Vocals => "vocals",
            StemName::Other => "other",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.as_str())
    }
}

impl fmt::Display for StemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
