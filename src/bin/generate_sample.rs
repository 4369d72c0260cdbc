use std::path::Path;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

const TITLES: [&str; 8] = [
    "Data Analyst",
    "Senior Data Analyst",
    "Data Engineer",
    "Data Scientist",
    "Machine Learning Engineer",
    "BI Developer",
    "Analytics Engineer",
    "Head of Data",
];

const COMPANIES: [&str; 10] = [
    "Acme Analytics",
    "Northwind",
    "Globex",
    "Initech",
    "Umbrella Health",
    "Stark Finance",
    "Wayne Logistics",
    "Hooli",
    "Pied Piper",
    "",
];

const COUNTRIES: [&str; 7] = [
    "France",
    "United States",
    "Canada",
    "Germany",
    "United Kingdom",
    "Spain",
    "",
];

const SENIORITIES: [(&str, f64); 8] = [
    ("Entry", 45_000.0),
    ("Junior", 55_000.0),
    ("Mid", 75_000.0),
    ("Senior", 105_000.0),
    ("Lead", 125_000.0),
    ("Principal", 150_000.0),
    ("Executive", 190_000.0),
    ("", 70_000.0),
];

/// Skill name and its salary premium.
const SKILLS: [(&str, f64); 16] = [
    ("SQL", 0.0),
    ("Python", 5_000.0),
    ("Excel", -8_000.0),
    ("Power BI", -2_000.0),
    ("Tableau", 0.0),
    ("R", 2_000.0),
    ("AWS", 9_000.0),
    ("Azure", 6_000.0),
    ("Snowflake", 12_000.0),
    ("Databricks", 14_000.0),
    ("Spark", 10_000.0),
    ("dbt", 8_000.0),
    ("Machine Learning", 15_000.0),
    ("PyTorch", 20_000.0),
    ("Scala", 18_000.0),
    ("Looker", 3_000.0),
];

const TOOLS: [&str; 8] = ["Git", "Docker", "Airflow", "Jira", "Kubernetes", "Terraform", "Jupyter", "VS Code"];
const DOMAINS: [&str; 6] = ["Finance", "Health", "Retail", "Energy", "Logistics", "Public sector"];
const SOFT_SKILLS: [&str; 5] = ["Communication", "Teamwork", "Autonomy", "Curiosity", "Rigour"];
const BENEFITS: [&str; 6] = ["Remote days", "Meal vouchers", "Stock options", "Training budget", "Gym", "Bonus"];
const SOURCES: [&str; 4] = ["LinkedIn", "Indeed", "Welcome to the Jungle", ""];
const CURRENCIES: [&str; 4] = ["USD", "USD", "USD", "EUR"];
const TRUTHY: [&str; 6] = ["True", "yes", "1", "oui", "false", ""];

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// `k` distinct items, in pick order.
    fn sample<'a>(&mut self, items: &[&'a str], k: usize) -> Vec<&'a str> {
        let mut pool: Vec<&str> = items.to_vec();
        let mut out = Vec::with_capacity(k);
        for _ in 0..k.min(pool.len()) {
            out.push(pool.swap_remove(self.below(pool.len())));
        }
        out
    }
}

/// One synthetic posting, already in the jobs-feed field names.
struct Posting {
    id: usize,
    title: &'static str,
    company: &'static str,
    country: &'static str,
    seniority: &'static str,
    salary: Option<f64>,
    currency: &'static str,
    salary_type: &'static str,
    hybrid: &'static str,
    visa: &'static str,
    skills: Vec<&'static str>,
    tools: Vec<&'static str>,
    domains: Vec<&'static str>,
    soft_skills: Vec<&'static str>,
    benefits: Vec<&'static str>,
    source: &'static str,
    date: String,
}

fn generate(rng: &mut SimpleRng, n: usize, start: NaiveDate) -> Vec<Posting> {
    let skill_names: Vec<&str> = SKILLS.iter().map(|(s, _)| *s).collect();
    (1..=n)
        .map(|id| {
            let (seniority, base) = *rng.pick(&SENIORITIES);
            let n_skills = 2 + rng.below(4);
            let n_tools = 1 + rng.below(3);
            let n_domains = 1 + rng.below(2);
            let n_soft = rng.below(3);
            let n_benefits = rng.below(4);
            let skills = rng.sample(&skill_names, n_skills);
            let premium: f64 = skills
                .iter()
                .filter_map(|s| SKILLS.iter().find(|(name, _)| name == s).map(|(_, p)| *p))
                .sum();
            // roughly one posting in five hides its salary
            let salary = (rng.next_f64() > 0.2)
                .then(|| (rng.gauss(base + premium, 12_000.0) / 500.0).round() * 500.0);
            let date = if rng.next_f64() < 0.05 {
                "not posted".to_string()
            } else {
                (start + Duration::days(rng.below(240) as i64)).to_string()
            };
            Posting {
                id,
                title: *rng.pick(&TITLES),
                company: *rng.pick(&COMPANIES),
                country: *rng.pick(&COUNTRIES),
                seniority,
                salary,
                currency: *rng.pick(&CURRENCIES),
                salary_type: if rng.next_f64() < 0.9 { "annual" } else { "monthly" },
                hybrid: *rng.pick(&TRUTHY),
                visa: *rng.pick(&TRUTHY),
                skills,
                tools: rng.sample(&TOOLS, n_tools),
                domains: rng.sample(&DOMAINS, n_domains),
                soft_skills: rng.sample(&SOFT_SKILLS, n_soft),
                benefits: rng.sample(&BENEFITS, n_benefits),
                source: *rng.pick(&SOURCES),
                date,
            }
        })
        .collect()
}

/// Jobs feed: JSON array, Python-style list strings, native booleans mixed in.
fn write_jobs_json(path: &Path, postings: &[Posting]) -> anyhow::Result<()> {
    let quoted = |items: &[&str]| {
        let inner: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
        format!("[{}]", inner.join(", "))
    };
    let rows: Vec<Value> = postings
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "title": p.title,
                "company": p.company,
                "country": p.country,
                "location": p.country,
                "seniority": p.seniority,
                "salary": p.salary.map_or(String::new(), |s| s.to_string()),
                "salary_currency": p.currency,
                "salary_type": p.salary_type,
                "hybrid": p.hybrid == "True" || p.hybrid == "yes",
                "visa": p.visa,
                "technical_skills": quoted(&p.skills),
                "tools": quoted(&p.tools),
                "domains": quoted(&p.domains),
                "soft_skills": quoted(&p.soft_skills),
                "benefits": p.benefits,
                "description": format!(
                    "{} position at {}. Stack: {}.",
                    p.title,
                    if p.company.is_empty() { "a confidential company" } else { p.company },
                    p.skills.join(", ")
                ),
                "link": format!("https://jobs.example.com/{}", p.id),
                "source": p.source,
                "date_posted": p.date,
            })
        })
        .collect();
    let text = serde_json::to_string_pretty(&rows)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// Stats feed: pipe-delimited, `;` inside list cells.
fn write_stats_csv(path: &Path, postings: &[Posting]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "job_title",
        "company",
        "country",
        "seniority_level",
        "salary_value",
        "salary_currency",
        "salary_type",
        "hybrid_policy",
        "visa_sponsorship",
        "technical_skills",
        "tools_used",
        "domains",
        "source",
        "date_posted",
    ])?;
    for p in postings {
        let salary = p.salary.map_or(String::new(), |s| s.to_string());
        let skills = p.skills.join(";");
        let tools = p.tools.join(";");
        let domains = p.domains.join(";");
        writer.write_record([
            p.title,
            p.company,
            p.country,
            p.seniority,
            salary.as_str(),
            p.currency,
            p.salary_type,
            p.hybrid,
            p.visa,
            skills.as_str(),
            tools.as_str(),
            domains.as_str(),
            p.source,
            p.date.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2025, 3, 1).context("invalid start date")?;
    let postings = generate(&mut rng, 600, start);

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let jobs_path = out_dir.join("jobs.json");
    write_jobs_json(&jobs_path, &postings)?;
    let stats_path = out_dir.join("job_data_clean.csv");
    write_stats_csv(&stats_path, &postings)?;

    log::info!("Generated {} postings", postings.len());
    println!(
        "Wrote {} postings to {} and {}",
        postings.len(),
        jobs_path.display(),
        stats_path.display()
    );
    Ok(())
}
