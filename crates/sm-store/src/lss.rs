//! LiveSplit splits files (`.lss`).
//!
//! Each session of a game is one `<Segment>` named after the game. Its
//! personal best split time holds the cumulative run time and its best
//! segment time the session time. A game without sessions is a single
//! segment without times. Estimate, state and session date travel in extra
//! children LiveSplit ignores.

use serde::{Deserialize, Serialize};
use sm_core::{GameRecord, RunDocument, SessionEntry, SplitDate, SplitTime};

use crate::StoreError;

const LSS_VERSION: &str = "1.7.0";
const CATEGORY: &str = "Sessions";
const PERSONAL_BEST: &str = "Personal Best";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "Run")]
struct LssRun {
    #[serde(rename = "@version", default)]
    version: String,
    #[serde(rename = "GameIcon", default)]
    game_icon: String,
    #[serde(rename = "GameName", default)]
    game_name: String,
    #[serde(rename = "CategoryName", default)]
    category_name: String,
    #[serde(rename = "AttemptCount", default)]
    attempt_count: u32,
    #[serde(rename = "Segments", default)]
    segments: LssSegments,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LssSegments {
    #[serde(rename = "Segment", default)]
    segment: Vec<LssSegment>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LssSegment {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Icon", default)]
    icon: String,
    #[serde(rename = "SplitTimes", default)]
    split_times: LssSplitTimes,
    #[serde(rename = "BestSegmentTime", default)]
    best_segment_time: LssTime,
    #[serde(rename = "Estimate", default, skip_serializing_if = "Option::is_none")]
    estimate: Option<String>,
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LssSplitTimes {
    #[serde(rename = "SplitTime", default)]
    split_time: Vec<LssSplitTime>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LssSplitTime {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "RealTime", default, skip_serializing_if = "Option::is_none")]
    real_time: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LssTime {
    #[serde(rename = "RealTime", default, skip_serializing_if = "Option::is_none")]
    real_time: Option<String>,
}

impl LssSegment {
    fn personal_best(&self) -> SplitTime {
        self.split_times
            .split_time
            .iter()
            .find(|t| t.name == PERSONAL_BEST)
            .and_then(|t| t.real_time.as_deref())
            .map(SplitTime::parse)
            .unwrap_or_default()
    }

    fn best_segment(&self) -> SplitTime {
        self.best_segment_time
            .real_time
            .as_deref()
            .map(SplitTime::parse)
            .unwrap_or_default()
    }
}

pub(crate) fn to_string(doc: &RunDocument) -> Result<String, StoreError> {
    let mut segments = Vec::new();
    let mut run_time = SplitTime::ZERO;

    for game in &doc.games {
        let entries: Vec<SessionEntry> = game
            .sessions
            .iter()
            .map(|s| SessionEntry::parse(s))
            .filter(|e| e.time.is_valid())
            .collect();

        if entries.is_empty() {
            segments.push(first_segment(game));
            continue;
        }

        for (i, entry) in entries.iter().enumerate() {
            run_time += entry.time;
            let mut segment = if i == 0 {
                first_segment(game)
            } else {
                LssSegment {
                    name: game.name.clone(),
                    ..LssSegment::default()
                }
            };
            segment.split_times.split_time.push(LssSplitTime {
                name: PERSONAL_BEST.to_string(),
                real_time: Some(run_time.to_wire()),
            });
            segment.best_segment_time.real_time = Some(entry.time.to_wire());
            segment.date = entry.date.is_valid().then(|| entry.date.to_string());
            segments.push(segment);
        }
    }

    let run = LssRun {
        version: LSS_VERSION.to_string(),
        game_icon: String::new(),
        game_name: doc.title.clone(),
        category_name: CATEGORY.to_string(),
        attempt_count: 0,
        segments: LssSegments { segment: segments },
    };

    let mut buffer = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);
    run.serialize(serializer)?;
    buffer.push('\n');
    Ok(buffer)
}

/// Segment opening a game: carries its estimate, state and icon.
fn first_segment(game: &GameRecord) -> LssSegment {
    LssSegment {
        name: game.name.clone(),
        icon: game.cover.clone().unwrap_or_default(),
        estimate: (!game.estimate.is_empty()).then(|| game.estimate.clone()),
        state: game.state.clone(),
        ..LssSegment::default()
    }
}

pub(crate) fn from_str(text: &str) -> Result<RunDocument, StoreError> {
    let run: LssRun = quick_xml::de::from_str(text)?;
    let mut games: Vec<GameRecord> = Vec::new();
    let mut previous_run_time = SplitTime::ZERO;

    for segment in run.segments.segment {
        let name = segment.name.trim().to_string();
        let personal_best = segment.personal_best();
        let time = match segment.best_segment() {
            time if time.is_valid() => time,
            _ if personal_best.is_valid() => personal_best - previous_run_time,
            _ => SplitTime::ZERO,
        };
        if personal_best.is_valid() {
            previous_run_time = personal_best;
        }

        if games.last().is_none_or(|last| last.name != name) {
            games.push(GameRecord {
                name,
                ..GameRecord::default()
            });
        }
        let Some(game) = games.last_mut() else {
            continue;
        };

        if game.estimate.is_empty() {
            game.estimate = segment.estimate.unwrap_or_default();
        }
        if game.state.is_none() {
            game.state = segment.state;
        }
        if game.cover.is_none() && !segment.icon.trim().is_empty() {
            game.cover = Some(segment.icon);
        }
        if time.is_valid() {
            let date = segment.date.as_deref().map(SplitDate::parse).unwrap_or_default();
            game.sessions.push(SessionEntry::new(time, date).to_string());
        }
    }

    Ok(RunDocument {
        title: run.game_name,
        games,
    })
}
