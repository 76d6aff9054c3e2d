//! Static job posting catalog and recommendation formatting.

use serde::{Deserialize, Serialize};

/// Keywords that mark a query as job-related. Multi-script on purpose:
/// users mix English, Hindi, and Punjabi terms freely.
const JOB_KEYWORDS: [&str; 7] = [
    "job",
    "naukri",
    "नौकरी",
    "ਨੌਕਰੀ",
    "career",
    "employment",
    "vacancy",
];

/// One static job posting returned by the recommendation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    /// Position title.
    pub title: String,
    /// Hiring organisation.
    pub company: String,
    /// Posting location.
    pub location: String,
    /// Category used for preference filtering.
    pub category: String,
    /// Experience band.
    pub experience: String,
    /// Short description.
    pub description: String,
    /// Compensation band.
    pub salary: String,
    /// Application deadline.
    pub deadline: String,
}

/// Whether the query text mentions jobs in any supported script.
pub fn mentions_jobs(query: &str) -> bool {
    let lowered = query.to_lowercase();
    JOB_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// The fixed posting list. Not persisted; a stand-in for a real
/// posting feed.
pub fn catalog() -> Vec<JobPosting> {
    vec![
        JobPosting {
            title: "Software Developer".to_string(),
            company: "Tech Corp India".to_string(),
            location: "Chandigarh".to_string(),
            category: "Technology".to_string(),
            experience: "2-5 years".to_string(),
            description: "Skilled software developers with Python experience.".to_string(),
            salary: "₹6-10 LPA".to_string(),
            deadline: "2025-07-31".to_string(),
        },
        JobPosting {
            title: "Government Officer".to_string(),
            company: "Punjab Government".to_string(),
            location: "Various Locations".to_string(),
            category: "Government Jobs".to_string(),
            experience: "1-3 years".to_string(),
            description: "Administrative officer position in state departments.".to_string(),
            salary: "₹4-7 LPA".to_string(),
            deadline: "2025-08-15".to_string(),
        },
        JobPosting {
            title: "Skill Development Trainer".to_string(),
            company: "Punjab Skill Development Mission".to_string(),
            location: "Ludhiana".to_string(),
            category: "Skill Development".to_string(),
            experience: "3-7 years".to_string(),
            description: "Trainer for digital literacy and communication skills.".to_string(),
            salary: "₹5-8 LPA".to_string(),
            deadline: "2025-07-20".to_string(),
        },
        JobPosting {
            title: "Staff Nurse".to_string(),
            company: "Civil Hospital Amritsar".to_string(),
            location: "Amritsar".to_string(),
            category: "Healthcare".to_string(),
            experience: "0-2 years".to_string(),
            description: "Nursing staff for the general ward.".to_string(),
            salary: "₹3-5 LPA".to_string(),
            deadline: "2025-08-01".to_string(),
        },
        JobPosting {
            title: "Bank Clerk".to_string(),
            company: "Punjab & Sind Bank".to_string(),
            location: "Jalandhar".to_string(),
            category: "Banking".to_string(),
            experience: "0-1 years".to_string(),
            description: "Clerical cadre openings across district branches.".to_string(),
            salary: "₹3-4 LPA".to_string(),
            deadline: "2025-07-25".to_string(),
        },
        JobPosting {
            title: "Farm Extension Officer".to_string(),
            company: "Department of Agriculture".to_string(),
            location: "Patiala".to_string(),
            category: "Agriculture".to_string(),
            experience: "1-4 years".to_string(),
            description: "Field officer advising on crop diversification.".to_string(),
            salary: "₹4-6 LPA".to_string(),
            deadline: "2025-08-10".to_string(),
        },
    ]
}

/// Filter the catalog by preferred category (exact match, pass-through
/// when unset) and truncate to `max` entries.
pub fn recommend(category: Option<&str>, max: usize) -> Vec<JobPosting> {
    let mut postings = catalog();
    if let Some(category) = category.filter(|category| !category.trim().is_empty()) {
        postings.retain(|posting| posting.category == category);
    }
    postings.truncate(max);
    postings
}

/// Render the recommendation block appended to a chat response.
pub fn format_block(postings: &[JobPosting]) -> String {
    let mut block = String::from("\n\nJob Recommendations:\n");
    for (index, posting) in postings.iter().enumerate() {
        block.push_str(&format!(
            "{}. {} at {}\n   Location: {}\n   Experience: {}\n   Salary: {}\n   Apply by: {}\n\n",
            index + 1,
            posting.title,
            posting.company,
            posting.location,
            posting.experience,
            posting.salary,
            posting.deadline,
        ));
    }
    block
}
