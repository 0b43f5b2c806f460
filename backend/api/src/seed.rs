//! Fixed initial data set loaded into the store at process start.
//!
//! There is no campaign-creation endpoint; these six campaigns (and their
//! ten historical donations) are the whole universe until the process is
//! restarted. The sports campaign is seeded at its goal and therefore
//! already `completed`.

use chrono::{DateTime, Utc};

use crate::models::{Campaign, CampaignStatus, Donation};

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("seed timestamps are valid RFC 3339")
}

pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: 1,
            title: "Save the Ocean".to_string(),
            description: "Help us clean up our oceans and protect marine life. Every dollar \
                          counts in our mission to preserve the beauty of our planet."
                .to_string(),
            goal: 50_000.0,
            raised: 32_500.0,
            image_url: "https://images.unsplash.com/photo-1559827260-dc66d52bef19?w=400"
                .to_string(),
            created_at: ts("2024-01-15T10:00:00Z"),
            status: CampaignStatus::Active,
            category: "Environment".to_string(),
            organizer: "Ocean Conservation Society".to_string(),
        },
        Campaign {
            id: 2,
            title: "Education for All".to_string(),
            description: "Providing educational resources to underserved communities. Help us \
                          build a brighter future through education."
                .to_string(),
            goal: 75_000.0,
            raised: 42_000.0,
            image_url: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?w=400"
                .to_string(),
            created_at: ts("2024-02-01T10:00:00Z"),
            status: CampaignStatus::Active,
            category: "Education".to_string(),
            organizer: "Education Foundation".to_string(),
        },
        Campaign {
            id: 3,
            title: "Food Bank Support".to_string(),
            description: "Helping local food banks feed families in need. Your donation helps \
                          put food on the table for those who need it most."
                .to_string(),
            goal: 30_000.0,
            raised: 18_500.0,
            image_url: "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c?w=400"
                .to_string(),
            created_at: ts("2024-02-10T10:00:00Z"),
            status: CampaignStatus::Active,
            category: "Hunger Relief".to_string(),
            organizer: "Community Food Bank".to_string(),
        },
        Campaign {
            id: 4,
            title: "Animal Shelter Renovation".to_string(),
            description: "Renovating our local animal shelter to provide better care for \
                          rescued animals. Help us create a safe haven for our furry friends."
                .to_string(),
            goal: 40_000.0,
            raised: 28_000.0,
            image_url: "https://images.unsplash.com/photo-1601758228041-f3b2795255f1?w=400"
                .to_string(),
            created_at: ts("2024-01-20T10:00:00Z"),
            status: CampaignStatus::Active,
            category: "Animals".to_string(),
            organizer: "Paws & Claws Rescue".to_string(),
        },
        Campaign {
            id: 5,
            title: "Clean Water Initiative".to_string(),
            description: "Bringing clean, safe drinking water to communities in need. Every \
                          donation helps us install water filtration systems."
                .to_string(),
            goal: 100_000.0,
            raised: 67_500.0,
            image_url: "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09?w=400"
                .to_string(),
            created_at: ts("2024-01-05T10:00:00Z"),
            status: CampaignStatus::Active,
            category: "Health".to_string(),
            organizer: "Water for All Foundation".to_string(),
        },
        Campaign {
            id: 6,
            title: "Youth Sports Program".to_string(),
            description: "Supporting youth sports programs in underserved areas. Help kids \
                          stay active and learn valuable life skills through sports."
                .to_string(),
            goal: 25_000.0,
            raised: 25_000.0,
            image_url: "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=400"
                .to_string(),
            created_at: ts("2024-02-15T10:00:00Z"),
            status: CampaignStatus::Completed,
            category: "Sports".to_string(),
            organizer: "Youth Sports Alliance".to_string(),
        },
    ]
}

pub fn donations() -> Vec<Donation> {
    let entry = |id, fundraiser_id, amount, donor_name: &str, message: &str, created, anonymous| {
        Donation {
            id,
            fundraiser_id,
            amount,
            donor_name: donor_name.to_string(),
            message: message.to_string(),
            created_at: ts(created),
            anonymous,
        }
    };

    vec![
        entry(1, 1, 50.0, "John Doe", "Great cause!", "2024-01-20T14:30:00Z", false),
        entry(2, 1, 100.0, "Jane Smith", "Keep up the good work!", "2024-01-21T09:15:00Z", false),
        entry(3, 2, 25.0, "Bob Johnson", "", "2024-02-05T16:45:00Z", false),
        entry(4, 1, 250.0, "Sarah Williams", "This is so important!", "2024-01-22T11:20:00Z", false),
        entry(5, 3, 75.0, "Mike Davis", "Happy to help!", "2024-02-11T08:30:00Z", false),
        entry(6, 2, 500.0, "Anonymous", "Keep doing great work!", "2024-02-06T14:00:00Z", true),
        entry(7, 4, 100.0, "Emily Chen", "Love animals!", "2024-01-21T15:45:00Z", false),
        entry(8, 5, 1000.0, "Robert Taylor", "Water is life", "2024-01-10T10:00:00Z", false),
        entry(9, 1, 30.0, "Lisa Anderson", "", "2024-01-23T13:15:00Z", false),
        entry(10, 4, 200.0, "David Brown", "Thank you for all you do!", "2024-01-22T09:30:00Z", false),
    ]
}
