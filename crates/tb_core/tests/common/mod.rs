//! Pools for the integration tests, built from JSON the way a dataset
//! file would be.
#![allow(dead_code)]

use serde_json::{json, Value};
use tb_core::{AssemblyEngine, BuilderConfig, EventLog, RosterPool};

fn player(id: String, position: &str) -> Value {
    json!({
        "id": id,
        "name": { "primary": id.to_uppercase(), "secondary": format!("{}-jp", id) },
        "position": position,
        "team": "raimon",
        "game": "IE1"
    })
}

/// `counts` players per position, in GK, DF, MF, FW order.
pub fn players(counts: [usize; 4]) -> Vec<Value> {
    ["GK", "DF", "MF", "FW"]
        .iter()
        .zip(counts)
        .flat_map(|(position, count)| {
            (1..=count).map(move |n| player(format!("{}-{}", position.to_lowercase(), n), position))
        })
        .collect()
}

fn formation(name: &str, counts: [usize; 4]) -> Value {
    let positions: Vec<&str> = ["GK", "DF", "MF", "FW"]
        .iter()
        .zip(counts)
        .flat_map(|(position, count)| std::iter::repeat(*position).take(count))
        .collect();
    json!({ "name": name, "positions": positions })
}

fn coaches() -> Vec<Value> {
    (1..=3)
        .map(|n| {
            json!({
                "id": format!("coach-{}", n),
                "name": { "primary": format!("Coach {}", n), "secondary": format!("監督{}", n) }
            })
        })
        .collect()
}

pub fn pool_from(formations: Vec<Value>, players: Vec<Value>) -> RosterPool {
    let doc = json!({ "formations": formations, "coaches": coaches(), "players": players });
    RosterPool::from_json_str(&doc.to_string()).expect("test pool should parse")
}

/// 20 players, five per position; formations need at most five of any.
pub fn standard_pool() -> RosterPool {
    pool_from(
        vec![
            formation("4-4-2 (F-Basic)", [1, 4, 4, 2]),
            formation("4-3-3", [1, 4, 3, 3]),
            formation("3-5-2", [1, 3, 5, 2]),
        ],
        players([5, 5, 5, 5]),
    )
}

/// A single keeper; the only formation asks for two.
pub fn single_keeper_pool() -> RosterPool {
    pool_from(vec![formation("2-keeper", [2, 4, 3, 2])], players([1, 5, 5, 5]))
}

/// 14 players: enough for the field, three short on the bench.
pub fn short_pool() -> RosterPool {
    pool_from(vec![formation("4-4-2 (F-Basic)", [1, 4, 4, 2])], players([2, 4, 4, 4]))
}

/// One player past a full field; the bench runs dry after its first slot.
pub fn bench_short_pool() -> RosterPool {
    pool_from(vec![formation("4-4-2 (F-Basic)", [1, 4, 4, 2])], players([1, 4, 4, 3]))
}

pub fn engine(pool: RosterPool, seed: u64) -> AssemblyEngine<EventLog> {
    AssemblyEngine::with_presenter(pool, BuilderConfig::seeded(seed), EventLog::new())
        .expect("test engine should build")
}
