mod schedule_scraper;

pub use schedule_scraper::{MonthPage, ScheduleScraper};
