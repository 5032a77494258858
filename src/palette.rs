/// Five display tiers for a day's count, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorBucket {
    Empty,
    Light,
    Medium,
    Dark,
    Darkest,
}

impl ColorBucket {
    pub fn hex(self) -> &'static str {
        match self {
            ColorBucket::Empty => "#ebedf0",
            ColorBucket::Light => "#c6e48b",
            ColorBucket::Medium => "#7bc96f",
            ColorBucket::Dark => "#239a3b",
            ColorBucket::Darkest => "#196127",
        }
    }
}

pub fn color_for(count: u64) -> ColorBucket {
    match count {
        0 => ColorBucket::Empty,
        1 => ColorBucket::Light,
        2..=3 => ColorBucket::Medium,
        4..=5 => ColorBucket::Dark,
        _ => ColorBucket::Darkest,
    }
}
