use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};

/// Write a deterministic sample of contact-analytics envelopes.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Output file.
    #[arg(short, long, default_value = "attached_assets/data.json")]
    output: PathBuf,

    /// Number of contacts.
    #[arg(short = 'n', long, default_value_t = 60)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const FIRST_NAMES: [&str; 10] = [
    "Jane", "Omar", "Priya", "Lucas", "Mei", "Tom", "Aisha", "Diego", "Sara", "Ken",
];
const LAST_NAMES: [&str; 8] = ["Doe", "Haddad", "Nair", "Silva", "Chen", "Berg", "Okafor", "Ruiz"];
const COMPANIES: [&str; 8] = [
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Vandelay", "Stark Labs", "Wayne Corp",
];
const ROLES: [&str; 6] = ["CTO", "CFO", "VP Engineering", "Product Manager", "Data Lead", "CEO"];
const CATEGORIES: [&str; 5] = ["Hiring", "Scaling", "Security", "Data Quality", "Cost Control"];
const KEYWORDS: [&str; 10] = [
    "cost", "speed", "support", "integration", "compliance", "latency", "talent", "budget", "legacy", "automation",
];
const SEVERITIES: [&str; 4] = ["Critical", "High", "Medium", "Low"];
const IMPACT_AREAS: [&str; 4] = ["Revenue", "Operations", "Customer Experience", "Engineering"];
const ACTIVITIES: [&str; 5] = ["Booth Visit", "Demo", "Quiz", "Photo Challenge", "Survey"];
const SPEEDS: [&str; 3] = ["Fast", "Moderate", "Slow"];
const PATTERNS: [&str; 3] = ["Consistent", "Bursty", "Sporadic"];
const FEATURES: [&str; 6] = ["Dashboards", "Alerts", "API", "SSO", "Reports", "Forecasting"];
const DEPTHS: [&str; 3] = ["Deep", "Moderate", "Shallow"];
const WILLINGNESS: [&str; 3] = ["High", "Medium", "Low"];
const SENTIMENTS: [&str; 4] = ["Positive", "Neutral", "Mixed", "Negative"];
const PROGRESSIONS: [&str; 3] = ["Improving", "Stable", "Declining"];
const PAIN_POINTS: [&str; 7] = [
    "manual reporting", "slow onboarding", "tool sprawl", "high cost", "poor visibility", "data silos", "vendor lock-in",
];
const SIGNALS: [&str; 5] = ["asked for pricing", "requested demo", "shared contacts", "praised UI", "booked call"];
const SIZES: [&str; 4] = ["Startup", "SMB", "Mid-Market", "Enterprise"];
const INDUSTRIES: [&str; 6] = ["Fintech", "Healthcare", "Retail", "Manufacturing", "SaaS", "Unknown"];
const ADOPTION: [&str; 6] = ["Innovator", "Early Adopter", "Early Majority", "Late Majority", "Laggard", "Unknown"];
const POSITIONS: [&str; 4] = ["Leader", "Challenger", "Follower", "Niche"];
const NEXT_STEPS: [&str; 4] = ["Schedule demo", "Send case study", "Intro to solutions engineer", "Nurture"];
const CONTENT: [&str; 4] = ["ROI calculator", "Security whitepaper", "Customer story", "Product tour"];
const FOLLOW_UP_TIMES: [&str; 3] = ["Within 24 hours", "Next week", "Next month"];
const CHANNELS: [&str; 4] = ["Email", "Phone", "LinkedIn", "In person"];
const TALKING_POINTS: [&str; 5] = ["time to value", "integrations", "pricing tiers", "support SLAs", "roadmap"];
const TIMELINES: [&str; 7] = ["30 days", "60 days", "90 days", "90+ days", "120 days", "180 days", "Unknown"];
const OBJECTIONS: [&str; 5] = ["price", "migration effort", "security review", "existing contract", "team bandwidth"];
const BUDGETS: [&str; 4] = ["Confirmed", "Likely", "Unclear", "None"];
const DECISION_MAKERS: [&str; 3] = ["Decision Maker", "Influencer", "End User"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Between `min` and `max` distinct items, in list order.
    fn subset(&mut self, items: &[&str], min: usize, max: usize) -> Vec<String> {
        let want = min + (self.next_u64() % (max - min + 1) as u64) as usize;
        let mut chosen: Vec<usize> = Vec::with_capacity(want);
        while chosen.len() < want.min(items.len()) {
            let i = (self.next_u64() % items.len() as u64) as usize;
            if !chosen.contains(&i) {
                chosen.push(i);
            }
        }
        chosen.sort_unstable();
        chosen.into_iter().map(|i| items[i].to_string()).collect()
    }
}

/// One envelope; engagement drives enthusiasm and lead score so the
/// correlation view has something to show.
fn contact(rng: &mut SimpleRng, index: usize) -> Value {
    let first = rng.pick(&FIRST_NAMES);
    let last = rng.pick(&LAST_NAMES);
    let engagement = rng.gauss(62.0, 18.0).clamp(0.0, 100.0).round();
    let enthusiasm = (engagement / 10.0 + rng.gauss(0.0, 1.5)).round().clamp(0.0, 10.0);
    let lead = (engagement / 20.0 + rng.gauss(0.0, 0.8)).round().clamp(0.0, 5.0);
    let completion = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0][(rng.next_u64() % 6) as usize];
    let participated = completion > 0.0 || rng.chance(0.2);

    // some exports carry scores as strings
    let lead_value = if rng.chance(0.1) { json!(lead.to_string()) } else { json!(lead) };

    let mut analytics = json!({
        "contact_id": format!("c{:03}", index + 1),
        "basic_info": {
            "full_name": format!("{first} {last}"),
            "company": rng.pick(&COMPANIES),
            "role": rng.pick(&ROLES),
        },
        "challenge_analysis": {
            "raw_challenge": format!("We struggle with {}", rng.pick(&PAIN_POINTS)),
            "category": rng.pick(&CATEGORIES),
            "keywords": rng.subset(&KEYWORDS, 1, 3),
            "severity_level": rng.pick(&SEVERITIES),
            "impact_area": rng.pick(&IMPACT_AREAS),
        },
        "scavenger_hunt_metrics": {
            "participated": participated,
            "completion_rate": completion,
            "completed_activities": rng.subset(&ACTIVITIES, 0, 4),
            "response_speed": rng.pick(&SPEEDS),
            "completed_full_hunt": completion >= 100.0,
        },
        "engagement_analysis": {
            "overall_score": engagement,
            "response_pattern": rng.pick(&PATTERNS),
            "interested_features": rng.subset(&FEATURES, 1, 3),
            "conversation_depth": rng.pick(&DEPTHS),
            "contact_sharing_willingness": rng.pick(&WILLINGNESS),
        },
        "sentiment_metrics": {
            "overall_sentiment": rng.pick(&SENTIMENTS),
            "sentiment_progression": rng.pick(&PROGRESSIONS),
            "enthusiasm_level": enthusiasm,
            "pain_points": rng.subset(&PAIN_POINTS, 1, 3),
            "satisfaction_signals": rng.subset(&SIGNALS, 0, 2),
        },
        "industry_insights": {
            "company_size_indicator": rng.pick(&SIZES),
            "industry_vertical": rng.pick(&INDUSTRIES),
            "tech_adoption_level": rng.pick(&ADOPTION),
            "competitive_position": rng.pick(&POSITIONS),
        },
        "follow_up_strategy": {
            "recommended_next_step": rng.pick(&NEXT_STEPS),
            "suggested_content": rng.pick(&CONTENT),
            "ideal_follow_up_time": rng.pick(&FOLLOW_UP_TIMES),
            "preferred_channel": rng.pick(&CHANNELS),
            "key_talking_points": rng.subset(&TALKING_POINTS, 1, 3),
        },
        "sales_qualification": {
            "lead_score": lead_value,
            "estimated_timeline": rng.pick(&TIMELINES),
            "objections_to_address": rng.subset(&OBJECTIONS, 0, 2),
            "budget_indicator": rng.pick(&BUDGETS),
            "decision_maker_status": rng.pick(&DECISION_MAKERS),
        },
    });

    // a few partial records with a section missing entirely
    if rng.chance(0.05) {
        if let Some(map) = analytics.as_object_mut() {
            map.remove("industry_insights");
        }
    }

    json!({ "message": { "content": { "contact_analytics": analytics } } })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut envelopes: Vec<Value> = (0..args.count).map(|i| contact(&mut rng, i)).collect();
    // an unrelated message that the dashboard skips
    envelopes.push(json!({ "message": { "content": { "text": "session closed" } } }));

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(&envelopes).context("serializing sample")?;
    std::fs::write(&args.output, json).with_context(|| format!("writing {}", args.output.display()))?;

    println!("Wrote {} contacts to {}", args.count, args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analytics(envelope: &Value) -> &serde_json::Map<String, Value> {
        envelope
            .pointer("/message/content/contact_analytics")
            .and_then(Value::as_object)
            .unwrap()
    }

    #[test]
    fn envelopes_carry_the_analytics_path() {
        let mut rng = SimpleRng::new(7);
        let envelope = contact(&mut rng, 0);
        let payload = analytics(&envelope);

        assert_eq!(payload["contact_id"], json!("c001"));
        assert!(payload["basic_info"]["full_name"].as_str().is_some_and(|n| n.contains(' ')));
        assert!(payload["sales_qualification"].is_object());
    }

    #[test]
    fn scores_stay_in_range_and_parse() {
        let mut rng = SimpleRng::new(3);
        for i in 0..200 {
            let envelope = contact(&mut rng, i);
            let payload = analytics(&envelope);
            let lead = &payload["sales_qualification"]["lead_score"];
            let lead = lead
                .as_f64()
                .or_else(|| lead.as_str().and_then(|s| s.parse().ok()))
                .unwrap();
            assert!((0.0..=5.0).contains(&lead));

            let enthusiasm = payload["sentiment_metrics"]["enthusiasm_level"].as_f64().unwrap();
            assert!((0.0..=10.0).contains(&enthusiasm));
        }
    }

    #[test]
    fn same_seed_gives_the_same_sample() {
        let sample = |seed| {
            let mut rng = SimpleRng::new(seed);
            (0..5).map(|i| contact(&mut rng, i)).collect::<Vec<_>>()
        };
        assert_eq!(sample(42), sample(42));
        assert_ne!(sample(42), sample(43));
    }

    #[test]
    fn subset_is_distinct_and_in_list_order() {
        let mut rng = SimpleRng::new(1);
        for _ in 0..50 {
            let picked = rng.subset(&KEYWORDS, 1, 3);
            assert!((1..=3).contains(&picked.len()));
            let positions: Vec<usize> = picked
                .iter()
                .map(|p| KEYWORDS.iter().position(|k| k == p).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
