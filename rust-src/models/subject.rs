//! Subject model as stored in the schedule JSON file.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};


const TIME_FORMAT: &str = "%H:%M";


/// Weekday a subject can meet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles", alias = "Miercoles")]
    Miercoles,
    Jueves,
    Viernes,
}


impl Day {
    /// All days in display order.
    pub const ALL: [Day; 5] = [
        Day::Lunes,
        Day::Martes,
        Day::Miercoles,
        Day::Jueves,
        Day::Viernes,
    ];

    /// Display name, with the accent the data files use.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Lunes => "Lunes",
            Day::Martes => "Martes",
            Day::Miercoles => "Miércoles",
            Day::Jueves => "Jueves",
            Day::Viernes => "Viernes",
        }
    }

    /// Position of the day within `Day::ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}


impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// How the subject is taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Presencial,
    Virtual,
    Mixta,
}


impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Presencial => "presencial",
            Modality::Virtual => "virtual",
            Modality::Mixta => "mixta",
        }
    }

    /// Capitalized label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Presencial => "Presencial",
            Modality::Virtual => "Virtual",
            Modality::Mixta => "Mixta",
        }
    }
}


impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Start and end time of a class, `inicio < fin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeRange {
    #[serde(rename = "inicio", serialize_with = "serialize_time")]
    pub start: NaiveTime,
    #[serde(rename = "fin", serialize_with = "serialize_time")]
    pub end: NaiveTime,
}


impl TimeRange {
    /// Build a range from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        let start = parse_time(start)?;
        let end = parse_time(end)?;

        if start >= end {
            return Err(format!(
                "start time {} must be before end time {}",
                start.format(TIME_FORMAT),
                end.format(TIME_FORMAT)
            ));
        }

        Ok(Self { start, end })
    }

    /// Label used for table rows, e.g. `18:00 - 21:00`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}


impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            inicio: String,
            fin: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        TimeRange::parse(&raw.inicio, &raw.fin).map_err(de::Error::custom)
    }
}


/// A single subject with its weekly meeting times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "horario")]
    pub hours: TimeRange,
    #[serde(rename = "dias")]
    pub days: Vec<Day>,
    #[serde(rename = "modalidad")]
    pub modality: Modality,
}


impl Subject {
    /// Check if the subject meets on the given day.
    pub fn meets_on(&self, day: Day) -> bool {
        self.days.contains(&day)
    }
}


fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time pattern"))
}


fn parse_time(value: &str) -> Result<NaiveTime, String> {
    if !time_pattern().is_match(value) {
        return Err(format!("invalid time '{}', expected HH:MM", value));
    }

    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| format!("invalid time '{}': {}", value, e))
}


fn serialize_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
}
