//! Static reference data embedded at build time
//!
//! Everything here is read-only sample content: the demo identity, courses,
//! events, FAQs, chat seeds, the classmate roster, home banners and the
//! campus map.

use anyhow::{Context, Result};
use chrono::Weekday;
use include_dir::{Dir, include_dir};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{Contact, User};

mod types;

pub use types::*;

static CATALOG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog/files");

#[derive(Debug, Deserialize)]
struct HomeFile {
    banners: Vec<Banner>,
    announcements: Vec<Announcement>,
}

#[derive(Debug, Deserialize)]
struct GuideFile {
    videos: Vec<VideoTutorial>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub demo_user: User,
    pub courses: Vec<Course>,
    pub events: Vec<AppEvent>,
    pub faqs: Vec<FaqItem>,
    pub chat_seeds: ChatSeeds,
    pub classmates: Vec<Contact>,
    pub banners: Vec<Banner>,
    pub announcements: Vec<Announcement>,
    pub videos: Vec<VideoTutorial>,
    pub campus: Campus,
}

impl Catalog {
    /// Decode the embedded data files
    pub fn load() -> Result<Self> {
        let home: HomeFile = read("home.json")?;
        let guide: GuideFile = read("guide.json")?;

        let catalog = Self {
            demo_user: read("user.json")?,
            courses: read("courses.json")?,
            events: read("events.json")?,
            faqs: read("faqs.json")?,
            chat_seeds: read("chat.json")?,
            classmates: read("classmates.json")?,
            banners: home.banners,
            announcements: home.announcements,
            videos: guide.videos,
            campus: read("campus.json")?,
        };

        log::debug!(
            "Loaded catalog: {} courses, {} events, {} classmates",
            catalog.courses.len(),
            catalog.events.len(),
            catalog.classmates.len()
        );
        Ok(catalog)
    }

    pub fn course_named(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn classmate(&self, id: &str) -> Option<&Contact> {
        self.classmates.iter().find(|c| c.id == id)
    }

    /// Events in chronological order of their start
    pub fn events_by_start(&self) -> Vec<&AppEvent> {
        let mut events: Vec<&AppEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Classes of `course_name` held on `weekday`
    pub fn classes_on(&self, course_name: &str, weekday: Weekday) -> Vec<&ScheduleItem> {
        let Some(day) = ScheduleDay::from_weekday(weekday) else {
            return Vec::new();
        };
        self.course_named(course_name)
            .map(|course| course.schedule.iter().filter(|item| item.day == day).collect())
            .unwrap_or_default()
    }
}

fn read<T: DeserializeOwned>(name: &str) -> Result<T> {
    let file = CATALOG_DIR
        .get_file(name)
        .with_context(|| format!("Missing catalog file {}", name))?;
    serde_json::from_slice(file.contents())
        .with_context(|| format!("Failed to decode catalog file {}", name))
}
