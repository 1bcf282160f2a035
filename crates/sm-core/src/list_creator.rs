//! Game lists built from spreadsheet rows pasted as tab-separated text.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::document::RunDocument;
use crate::game::{Game, GameDesc, GameState, ParsingInfos};
use crate::time::SplitTime;

/// A spreadsheet column, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetField {
    State,
    Year,
    Name,
    Type,
    Platform,
    Version,
    Estimate,
    Played,
}

impl SheetField {
    pub const ALL: [Self; 8] = [
        Self::State,
        Self::Year,
        Self::Name,
        Self::Type,
        Self::Platform,
        Self::Version,
        Self::Estimate,
        Self::Played,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Year => "year",
            Self::Name => "name",
            Self::Type => "type",
            Self::Platform => "platform",
            Self::Version => "version",
            Self::Estimate => "estimate",
            Self::Played => "played",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SheetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetField {
    type Err = UnknownSheetField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == lower)
            .ok_or_else(|| UnknownSheetField(s.to_string()))
    }
}

/// Error type for unknown column names.
#[derive(Debug, Clone)]
pub struct UnknownSheetField(String);

impl fmt::Display for UnknownSheetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sheet field: {}", self.0)
    }
}

impl std::error::Error for UnknownSheetField {}

/// Which columns the pasted rows contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet([bool; SheetField::ALL.len()]);

impl Default for FieldSet {
    fn default() -> Self {
        Self([true; SheetField::ALL.len()])
    }
}

impl FieldSet {
    pub const fn none() -> Self {
        Self([false; SheetField::ALL.len()])
    }

    #[must_use]
    pub fn with(mut self, field: SheetField) -> Self {
        self.0[field.position()] = true;
        self
    }

    #[must_use]
    pub fn without(mut self, field: SheetField) -> Self {
        self.0[field.position()] = false;
        self
    }

    pub const fn contains(&self, field: SheetField) -> bool {
        self.0[field.position()]
    }

    pub fn selected(&self) -> impl Iterator<Item = SheetField> + '_ {
        SheetField::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

/// Parses a comma-separated list of column names.
impl FromStr for FieldSet {
    type Err = UnknownSheetField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .try_fold(Self::none(), |set, part| Ok(set.with(part.parse()?)))
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.selected().map(SheetField::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListCreator {
    pub fields: FieldSet,
    /// Name games `"<year> - <name>"` when both columns are present.
    pub merge_year_and_name: bool,
}

impl Default for ListCreator {
    fn default() -> Self {
        Self {
            fields: FieldSet::default(),
            merge_year_and_name: true,
        }
    }
}

impl ListCreator {
    pub const fn new(fields: FieldSet, merge_year_and_name: bool) -> Self {
        Self {
            fields,
            merge_year_and_name,
        }
    }

    /// Assigns the cells of a row to the selected columns, in order.
    fn cells<'a>(&self, line: &'a str) -> [&'a str; SheetField::ALL.len()] {
        let mut cells = [""; SheetField::ALL.len()];
        for (field, cell) in self.fields.selected().zip(line.split('\t')) {
            cells[field.position()] = cell.trim();
        }
        cells
    }

    /// Reads one row. Replaced or ignored rows and rows without a name give `None`.
    pub fn parse_row(&self, line: &str) -> Option<GameDesc> {
        let cells = self.cells(line.trim_end_matches('\r'));
        let cell = |field: SheetField| cells[field.position()];
        let mut desc = GameDesc::default();

        if self.fields.contains(SheetField::State) {
            let state = cell(SheetField::State);
            if state.contains("Remplac") || state.contains("Ignor") {
                debug!(row = line, "skipping replaced or ignored row");
                return None;
            }
            desc.state = if state.contains("En cours") {
                GameState::Playing
            } else if state.contains("Termin") {
                GameState::Finished
            } else if state.contains("Abandonn") {
                GameState::Abandonned
            } else {
                GameState::None
            };
        }

        if self.fields.contains(SheetField::Name) {
            desc.name = if self.merge_year_and_name && self.fields.contains(SheetField::Year) {
                format!("{} - {}", cell(SheetField::Year), cell(SheetField::Name))
            } else {
                cell(SheetField::Name).to_string()
            };
        }

        if self.fields.contains(SheetField::Estimate) {
            desc.estimation = SplitTime::parse(cell(SheetField::Estimate));
        }
        if self.fields.contains(SheetField::Played) {
            desc.played = SplitTime::parse(cell(SheetField::Played));
        }

        (desc.is_valid() && !cell(SheetField::Name).is_empty()).then_some(desc)
    }

    /// Builds a whole run from pasted rows.
    pub fn create(&self, title: &str, text: &str) -> RunDocument {
        info!(fields = %self.fields, "creating game list");
        let mut parsing = ParsingInfos::default();
        let games: Vec<Game> = text
            .lines()
            .filter_map(|line| self.parse_row(line))
            .map(|desc| Game::new(desc, &mut parsing))
            .inspect(|game| {
                debug!(
                    game = %game.name(),
                    state = %game.state(),
                    played = %game.played(),
                    estimate = %game.estimation(),
                    "game added"
                );
            })
            .collect();

        RunDocument {
            title: title.to_string(),
            games: games.iter().map(Game::to_record).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "Terminé\t2018\tCeleste\tPlatformer\tSwitch\tEU\t10:00\t12:30\n\
                         Remplacé\t2019\tControl\tAction\tPC\tEU\t15:00\t\n\
                         En cours\t2020\tHades\tRogue\tPC\tEU\t20:00\t05:15:30\n\
                         \t2021\tTunic\tAdventure\tPC\tEU\t12:00\t\n\
                         Abandonné\t2022\tElden Ring\tRPG\tPC\tEU\t100:00\t30:00\n";

    #[test]
    fn parses_full_rows() {
        let creator = ListCreator::default();
        let desc = creator
            .parse_row("Terminé\t2018\tCeleste\tPlatformer\tSwitch\tEU\t10:00\t12:30\r")
            .unwrap();

        assert_eq!(desc.name, "2018 - Celeste");
        assert_eq!(desc.state, GameState::Finished);
        assert_eq!(desc.estimation, SplitTime::from_hms(10, 0, 0));
        assert_eq!(desc.played, SplitTime::from_hms(12, 30, 0));
    }

    #[test]
    fn long_times_carry_seconds() {
        let desc = ListCreator::default()
            .parse_row("En cours\t2020\tHades\tRogue\tPC\tEU\t20:00\t05:15:30")
            .unwrap();

        assert_eq!(desc.played, SplitTime::from_hms(5, 15, 30));
    }

    #[test]
    fn replaced_and_nameless_rows_are_skipped() {
        let creator = ListCreator::default();

        assert!(creator.parse_row("Remplacé\t2019\tControl\t\t\t\t15:00\t").is_none());
        assert!(creator.parse_row("Ignoré\t2019\tControl\t\t\t\t15:00\t").is_none());
        assert!(creator.parse_row("En cours\t2019\t\t\t\t\t15:00\t").is_none());
        assert!(creator.parse_row("").is_none());
    }

    #[test]
    fn deselected_columns_do_not_consume_cells() {
        let fields: FieldSet = "name, estimate".parse().unwrap();
        let creator = ListCreator::new(fields, true);
        let desc = creator.parse_row("Outer Wilds\t22:00").unwrap();

        assert_eq!(desc.name, "Outer Wilds");
        assert_eq!(desc.state, GameState::None);
        assert_eq!(desc.estimation, SplitTime::from_hms(22, 0, 0));
        assert!(!desc.played.is_valid());
    }

    #[test]
    fn year_merge_can_be_turned_off() {
        let creator = ListCreator::new(FieldSet::default(), false);
        let desc = creator
            .parse_row("\t2021\tTunic\tAdventure\tPC\tEU\t12:00\t")
            .unwrap();

        assert_eq!(desc.name, "Tunic");
    }

    #[test]
    fn unknown_field_names_are_rejected() {
        assert!("name, colour".parse::<FieldSet>().is_err());
        assert_eq!(
            "Name,Played".parse::<FieldSet>().unwrap(),
            FieldSet::none().with(SheetField::Name).with(SheetField::Played)
        );
    }

    #[test]
    fn creates_run_document() {
        let doc = ListCreator::default().create("1 Year 1 Game", SHEET);
        let names: Vec<&str> = doc.games.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(
            names,
            ["2018 - Celeste", "2020 - Hades", "2021 - Tunic", "2022 - Elden Ring"]
        );
        assert_eq!(doc.games[0].state.as_deref(), Some("Finished"));
        assert_eq!(doc.games[0].sessions, ["12:30:00"]);
        assert_eq!(doc.games[1].estimate, "20:00:00");
        assert_eq!(doc.games[2].state, None);
        assert!(doc.games[2].sessions.is_empty());
        assert_eq!(doc.games[3].state.as_deref(), Some("Abandonned"));
        assert_eq!(doc.games[3].sessions, ["30:00:00"]);
    }
}
