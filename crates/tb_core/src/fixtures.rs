// Shared test data for unit tests
use crate::models::{
    Coach, Emblem, Formation, LocalizedName, Player, Position, Team, ViewportClass,
};
use crate::pool::RosterPool;

const NUMBERS: [&str; 5] = ["One", "Two", "Three", "Four", "Five"];

fn role(position: Position) -> (&'static str, &'static str) {
    match position {
        Position::GK => ("Keeper", "キーパー"),
        Position::DF => ("Defender", "ディフェンダー"),
        Position::MF => ("Midfielder", "ミッドフィルダー"),
        Position::FW => ("Forward", "フォワード"),
    }
}

fn player(position: Position, n: usize) -> Player {
    let (english, japanese) = role(position);
    let team = if n % 2 == 1 { "raimon" } else { "royal" };
    let mut player = Player::new(
        format!("{}-{}", position.code().to_lowercase(), n),
        LocalizedName::new(format!("{} {}", english, NUMBERS[n - 1]), format!("{}{}", japanese, n)),
        position,
        team,
    );
    player.game = "IE1".to_string();
    player
}

fn shape(gk: usize, df: usize, mf: usize, fw: usize) -> Vec<Position> {
    let mut positions = vec![Position::GK; gk];
    positions.extend(vec![Position::DF; df]);
    positions.extend(vec![Position::MF; mf]);
    positions.extend(vec![Position::FW; fw]);
    positions
}

fn coaches(count: usize) -> Vec<Coach> {
    (1..=count)
        .map(|n| {
            Coach::new(
                format!("coach-{}", n),
                LocalizedName::new(format!("Coach {}", n), format!("監督{}", n)),
            )
        })
        .collect()
}

/// 20 players (five per position), six 11-slot formations, six coaches,
/// two teams with crests.
pub fn standard_pool() -> RosterPool {
    let players = Position::ALL
        .iter()
        .flat_map(|&position| (1..=5).map(move |n| player(position, n)))
        .collect();

    let formations = vec![
        Formation::new("4-4-2 (F-Basic)", shape(1, 4, 4, 2))
            .with_template(ViewportClass::Phone, "<div class=\"f442 phone\"></div>")
            .with_template(ViewportClass::Desktop, "<div class=\"f442\"></div>"),
        Formation::new("4-3-3", shape(1, 4, 3, 3)),
        Formation::new("3-5-2", shape(1, 3, 5, 2)),
        Formation::new("5-3-2", shape(1, 5, 3, 2)),
        Formation::new("4-5-1", shape(1, 4, 5, 1)),
        Formation::new("3-4-3", shape(1, 3, 4, 3)),
    ];

    let teams = vec![
        Team {
            id: "raimon".into(),
            name: LocalizedName::new("Raimon", "雷門"),
            game: "IE1".to_string(),
            sprite: String::new(),
        },
        Team {
            id: "royal".into(),
            name: LocalizedName::new("Royal Academy", "帝国学園"),
            game: "IE1".to_string(),
            sprite: String::new(),
        },
    ];
    let emblems = vec![
        Emblem {
            id: "royal-crest".into(),
            team_name: LocalizedName::new("Royal Academy", "帝国学園"),
            sprite: String::new(),
        },
        Emblem {
            id: "raimon-crest".into(),
            team_name: LocalizedName::new("Raimon", "雷門"),
            sprite: String::new(),
        },
    ];

    RosterPool::new(formations, coaches(6), players).with_teams(teams).with_emblems(emblems)
}

/// One keeper against a formation that wants two.
///
/// 16 players in total, so a random fill can still cover every slot.
pub fn single_keeper_pool() -> RosterPool {
    let mut players = vec![player(Position::GK, 1)];
    players.extend((1..=5).map(|n| player(Position::DF, n)));
    players.extend((1..=5).map(|n| player(Position::MF, n)));
    players.extend((1..=5).map(|n| player(Position::FW, n)));

    let formations = vec![Formation::new("2-keeper", shape(2, 4, 3, 2))];
    RosterPool::new(formations, coaches(2), players)
}
