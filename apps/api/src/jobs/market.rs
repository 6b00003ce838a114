use serde::Serialize;

use crate::models::job::JobSource;

pub const TOP_HIRING_CITIES: [&str; 12] = [
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata",
    "Pune", "Ahmedabad", "Jaipur", "Gurgaon", "Noida", "Indore",
];

pub const POPULAR_SKILLS: [&str; 6] = ["Python", "Java", "JavaScript", "React", "SQL", "AWS"];

#[derive(Debug, Clone, Serialize)]
pub struct SalaryRanges {
    pub fresher: &'static str,
    pub mid_level: &'static str,
    pub senior: &'static str,
}

/// Static snapshot of the Indian job market served by `/api/v1/market-insights`.
#[derive(Debug, Clone, Serialize)]
pub struct MarketOverview {
    pub top_hiring_cities: Vec<&'static str>,
    pub popular_skills: Vec<&'static str>,
    pub salary_ranges: SalaryRanges,
    pub api_sources: Vec<JobSource>,
}

pub fn market_overview() -> MarketOverview {
    MarketOverview {
        top_hiring_cities: TOP_HIRING_CITIES.to_vec(),
        popular_skills: POPULAR_SKILLS.to_vec(),
        salary_ranges: SalaryRanges {
            fresher: "₹2-4 Lakhs",
            mid_level: "₹4-8 Lakhs",
            senior: "₹8-15 Lakhs",
        },
        api_sources: JobSource::PRIORITY.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_serializes_display_names() {
        let value = serde_json::to_value(market_overview()).unwrap();
        assert_eq!(
            value["api_sources"],
            serde_json::json!(["Google Jobs", "Adzuna", "JSearch", "ArbeitsNow"])
        );
        assert_eq!(value["salary_ranges"]["mid_level"], "₹4-8 Lakhs");
        assert_eq!(value["top_hiring_cities"].as_array().unwrap().len(), 12);
    }
}
