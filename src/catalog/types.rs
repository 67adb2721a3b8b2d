use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Sender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinator {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    /// Hours
    pub workload: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub semester: u32,
    pub subjects: Vec<Subject>,
}

impl Curriculum {
    pub fn total_workload(&self) -> u32 {
        self.subjects.iter().map(|s| s.workload).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub subjects: Vec<String>,
}

/// Teaching days of the weekly schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleDay {
    Segunda,
    #[serde(rename = "Terça")]
    Terca,
    Quarta,
    Quinta,
    Sexta,
}

impl ScheduleDay {
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(ScheduleDay::Segunda),
            Weekday::Tue => Some(ScheduleDay::Terca),
            Weekday::Wed => Some(ScheduleDay::Quarta),
            Weekday::Thu => Some(ScheduleDay::Quinta),
            Weekday::Fri => Some(ScheduleDay::Sexta),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleDay::Segunda => "Segunda",
            ScheduleDay::Terca => "Terça",
            ScheduleDay::Quarta => "Quarta",
            ScheduleDay::Quinta => "Quinta",
            ScheduleDay::Sexta => "Sexta",
        }
    }
}

/// pt-BR weekday name as shown in the home header
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Domingo",
        Weekday::Mon => "Segunda",
        Weekday::Tue => "Terça",
        Weekday::Wed => "Quarta",
        Weekday::Thu => "Quinta",
        Weekday::Fri => "Sexta",
        Weekday::Sat => "Sábado",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub day: ScheduleDay,
    /// "HH:MM - HH:MM"
    pub time: String,
    pub subject: String,
    pub professor: String,
    pub location: String,
}

impl ScheduleItem {
    pub fn starts_at(&self) -> &str {
        self.time.split(" - ").next().unwrap_or(&self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub coordinator: Coordinator,
    pub matrix: Vec<Curriculum>,
    pub professors: Vec<Professor>,
    pub schedule: Vec<ScheduleItem>,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Exam,
    Event,
    Deadline,
    Registration,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Exam => "Prova",
            EventKind::Event => "Evento",
            EventKind::Deadline => "Prazo",
            EventKind::Registration => "Inscrição",
        }
    }
}

/// Course id of events open to everyone
pub const ALL_COURSES: &str = "todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEvent {
    pub id: String,
    pub title: String,
    pub course_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl AppEvent {
    /// "HH:MM" or "HH:MM - HH:MM" when the event has a duration
    pub fn time_range(&self) -> String {
        let start = self.start.format("%H:%M").to_string();
        if self.end == self.start {
            start
        } else {
            format!("{} - {}", start, self.end.format("%H:%M"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Notice,
    Material,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub body: String,
    pub posted: String,
    pub kind: AnnouncementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTutorial {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    pub address: String,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl Campus {
    pub fn map_search_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&self.address)
        )
    }
}

/// Seed message with a timestamp relative to startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub minutes_ago: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatSeeds {
    pub community: Vec<SeedMessage>,
    pub support: Vec<SeedMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(start: (u32, u32), end: (u32, u32)) -> AppEvent {
        let day = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        AppEvent {
            id: "e".to_string(),
            title: "Prova".to_string(),
            course_id: ALL_COURSES.to_string(),
            start: day.and_hms_opt(start.0, start.1, 0).unwrap(),
            end: day.and_hms_opt(end.0, end.1, 0).unwrap(),
            location: "Sala 12".to_string(),
            kind: EventKind::Exam,
        }
    }

    #[test]
    fn test_time_range_hides_equal_end() {
        assert_eq!(event((14, 0), (16, 0)).time_range(), "14:00 - 16:00");
        assert_eq!(event((23, 59), (23, 59)).time_range(), "23:59");
    }

    #[test]
    fn test_schedule_day_mapping() {
        assert_eq!(ScheduleDay::from_weekday(Weekday::Tue), Some(ScheduleDay::Terca));
        assert_eq!(ScheduleDay::from_weekday(Weekday::Sun), None);
        assert_eq!(weekday_name(Weekday::Sat), "Sábado");

        let day: ScheduleDay = serde_json::from_str("\"Terça\"").unwrap();
        assert_eq!(day, ScheduleDay::Terca);
    }

    #[test]
    fn test_map_url_is_encoded() {
        let campus = Campus {
            address: "Praça José Bastos, 55".to_string(),
            points_of_interest: Vec::new(),
        };
        assert_eq!(
            campus.map_search_url(),
            "https://www.google.com/maps/search/?api=1&query=Pra%C3%A7a%20Jos%C3%A9%20Bastos%2C%2055"
        );
    }
}
