//! Static sample records fed into form-fill scenarios
//!
//! All fixtures are immutable value objects. Records that end up as
//! rows in the application are uniquified per run through
//! [`FixtureArena`], so no scenario depends on leftovers from a
//! previous run or on the execution order of other files.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A community operated by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityFixture {
    pub name: String,
    pub province: String,
    pub description: String,
}

/// A local store inside a community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFixture {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub open_hours: String,
}

/// A community member account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberFixture {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// A homestay listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomestayFixture {
    pub name: String,
    pub capacity: u32,
    pub price_per_night: u32,
    pub description: String,
}

/// A tour package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageFixture {
    pub name: String,
    pub price: u32,
    pub duration_days: u32,
    pub description: String,
}

/// A content tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagFixture {
    pub name: String,
}

/// A homepage banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerFixture {
    pub title: String,
    pub image_path: String,
    pub link_url: String,
}

pub fn sample_community() -> CommunityFixture {
    CommunityFixture {
        name: "บ้านแม่กำปอง".to_string(),
        province: "เชียงใหม่".to_string(),
        description: "ชุมชนท่องเที่ยวเชิงอนุรักษ์กลางหุบเขา".to_string(),
    }
}

pub fn sample_store() -> StoreFixture {
    StoreFixture {
        name: "ร้านกาแฟริมธาร".to_string(),
        description: "กาแฟคั่วมือจากสวนในชุมชน".to_string(),
        phone: "0812345678".to_string(),
        open_hours: "08:00-17:00".to_string(),
    }
}

pub fn sample_member() -> MemberFixture {
    MemberFixture {
        full_name: "สมชาย ใจดี".to_string(),
        email: "member_new@example.com".to_string(),
        phone: "0898765432".to_string(),
    }
}

pub fn sample_homestay() -> HomestayFixture {
    HomestayFixture {
        name: "โฮมสเตย์บ้านสวน".to_string(),
        capacity: 4,
        price_per_night: 800,
        description: "บ้านไม้สองชั้น วิวนาข้าว".to_string(),
    }
}

pub fn sample_package() -> PackageFixture {
    PackageFixture {
        name: "แพ็กเกจเดินป่าสองวัน".to_string(),
        price: 2500,
        duration_days: 2,
        description: "เดินป่า พักโฮมสเตย์ อาหารพื้นบ้านสามมื้อ".to_string(),
    }
}

pub fn sample_tag() -> TagFixture {
    TagFixture {
        name: "Tag-1-Relax".to_string(),
    }
}

pub fn sample_banner() -> BannerFixture {
    BannerFixture {
        title: "เที่ยวหน้าฝน".to_string(),
        image_path: "fixtures/banner.png".to_string(),
        link_url: "/packages/".to_string(),
    }
}

/// Sample-record values scenarios can reference as `{{store.name}}`-style
/// placeholders, keeping the Thai literals in one place.
fn placeholder_values() -> Vec<(&'static str, String)> {
    let community = sample_community();
    let store = sample_store();
    let member = sample_member();
    let homestay = sample_homestay();
    let package = sample_package();
    let tag = sample_tag();
    let banner = sample_banner();
    vec![
        ("community.name", community.name),
        ("community.province", community.province),
        ("community.description", community.description),
        ("store.name", store.name),
        ("store.description", store.description),
        ("store.phone", store.phone),
        ("store.open_hours", store.open_hours),
        ("member.full_name", member.full_name),
        ("member.email", member.email),
        ("member.phone", member.phone),
        ("homestay.name", homestay.name),
        ("homestay.capacity", homestay.capacity.to_string()),
        ("homestay.price_per_night", homestay.price_per_night.to_string()),
        ("homestay.description", homestay.description),
        ("package.name", package.name),
        ("package.price", package.price.to_string()),
        ("package.duration_days", package.duration_days.to_string()),
        ("package.description", package.description),
        ("tag.name", tag.name),
        ("banner.title", banner.title),
        ("banner.link_url", banner.link_url),
    ]
}

/// Per-run namespace for records scenarios create in the application.
///
/// The legacy suite shared named rows across files and relied on test
/// ordering for delete flows. The arena replaces that: every record a
/// scenario creates carries the run ID in its name, so runs never
/// collide and scenarios can execute in any order.
#[derive(Debug, Clone)]
pub struct FixtureArena {
    run_id: String,
}

impl FixtureArena {
    /// Allocate an arena with a fresh run ID.
    pub fn new() -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect();
        let run_id = format!("{}-{}", chrono::Utc::now().format("%Y%m%d%H%M%S"), suffix);
        Self { run_id }
    }

    /// Build an arena with a fixed run ID (for reproducing a run).
    pub fn with_run_id(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Uniquify a record name with this run's ID.
    pub fn name(&self, base: &str) -> String {
        format!("{}-{}", base, self.run_id)
    }

    /// Substitute `{{run_id}}` and sample-record placeholders
    /// (`{{store.name}}`, `{{member.phone}}`, ...) in a scenario value.
    pub fn substitute(&self, value: &str) -> String {
        let mut out = value.replace("{{run_id}}", &self.run_id);
        if out.contains("{{") {
            for (key, replacement) in placeholder_values() {
                out = out.replace(&format!("{{{{{}}}}}", key), &replacement);
            }
        }
        out
    }
}

impl Default for FixtureArena {
    fn default() -> Self {
        Self::new()
    }
}
