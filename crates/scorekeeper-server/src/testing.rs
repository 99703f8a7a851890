//! In-memory repository for router tests.
//!
//! Mirrors the store's observable rules: ids count up from 1, lists are in id
//! order, scores must reference existing rows, and deleting a player or game
//! removes its scores.

use async_trait::async_trait;
use chrono::{Days, Utc};
use scorekeeper_core::{
    Entity, Game, GenrePopularityRow, Player, PlayerNameRow, PlayerScoreRow,
    RECENT_PLAYER_WINDOW_DAYS, RecentPlayerRow, RecordId, Score, TOP_PLAYERS_LIMIT, TopPlayerRow,
};
use scorekeeper_store::{
    GameRepository, PlayerRepository, ReportRepository, ScoreRepository, StoreError,
};
use scorekeeper_validate::{GamePatch, NewGame, NewPlayer, NewScore, PlayerPatch, ScorePatch};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Tables {
    players: BTreeMap<RecordId, Player>,
    games: BTreeMap<RecordId, Game>,
    scores: BTreeMap<RecordId, Score>,
    next_player: RecordId,
    next_game: RecordId,
    next_score: RecordId,
}

impl Tables {
    fn check_refs(&self, player_id: RecordId, game_id: RecordId) -> Result<(), StoreError> {
        if !self.players.contains_key(&player_id) {
            return Err(fk_violation("scores_player_id_fkey"));
        }
        if !self.games.contains_key(&game_id) {
            return Err(fk_violation("scores_game_id_fkey"));
        }
        Ok(())
    }
}

fn fk_violation(constraint: &str) -> StoreError {
    StoreError::Database {
        message: format!(
            "insert or update on table \"scores\" violates foreign key constraint \"{}\"",
            constraint
        ),
        code: Some("23503".to_string()),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a database error.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(StoreError::Database {
                message,
                code: Some("08006".to_string()),
            });
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.enter()?.players.values().cloned().collect())
    }

    async fn get_player(&self, id: RecordId) -> Result<Player, StoreError> {
        self.enter()?
            .players
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Player, id))
    }

    async fn create_player(&self, input: NewPlayer) -> Result<Player, StoreError> {
        let mut t = self.enter()?;
        t.next_player += 1;
        let player = Player {
            id: t.next_player,
            name: input.name,
            join_date: input.join_date,
        };
        t.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn update_player(&self, id: RecordId, patch: PlayerPatch) -> Result<Player, StoreError> {
        let mut t = self.enter()?;
        let player = t
            .players
            .get_mut(&id)
            .ok_or(StoreError::not_found(Entity::Player, id))?;
        if let Some(name) = patch.name {
            player.name = name;
        }
        if let Some(join_date) = patch.join_date {
            player.join_date = join_date;
        }
        Ok(player.clone())
    }

    async fn delete_player(&self, id: RecordId) -> Result<(), StoreError> {
        let mut t = self.enter()?;
        t.players
            .remove(&id)
            .ok_or(StoreError::not_found(Entity::Player, id))?;
        t.scores.retain(|_, s| s.player_id != id);
        Ok(())
    }
}

#[async_trait]
impl GameRepository for MemoryStore {
    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        Ok(self.enter()?.games.values().cloned().collect())
    }

    async fn get_game(&self, id: RecordId) -> Result<Game, StoreError> {
        self.enter()?
            .games
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Game, id))
    }

    async fn create_game(&self, input: NewGame) -> Result<Game, StoreError> {
        let mut t = self.enter()?;
        t.next_game += 1;
        let game = Game {
            id: t.next_game,
            title: input.title,
            genre: input.genre,
        };
        t.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn update_game(&self, id: RecordId, patch: GamePatch) -> Result<Game, StoreError> {
        let mut t = self.enter()?;
        let game = t
            .games
            .get_mut(&id)
            .ok_or(StoreError::not_found(Entity::Game, id))?;
        if let Some(title) = patch.title {
            game.title = title;
        }
        if let Some(genre) = patch.genre {
            game.genre = genre;
        }
        Ok(game.clone())
    }

    async fn delete_game(&self, id: RecordId) -> Result<(), StoreError> {
        let mut t = self.enter()?;
        t.games
            .remove(&id)
            .ok_or(StoreError::not_found(Entity::Game, id))?;
        t.scores.retain(|_, s| s.game_id != id);
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for MemoryStore {
    async fn list_scores(&self) -> Result<Vec<Score>, StoreError> {
        Ok(self.enter()?.scores.values().cloned().collect())
    }

    async fn get_score(&self, id: RecordId) -> Result<Score, StoreError> {
        self.enter()?
            .scores
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Score, id))
    }

    async fn create_score(&self, input: NewScore) -> Result<Score, StoreError> {
        let mut t = self.enter()?;
        t.check_refs(input.player_id, input.game_id)?;
        t.next_score += 1;
        let score = Score {
            id: t.next_score,
            player_id: input.player_id,
            game_id: input.game_id,
            score: input.score,
            date_played: input.date_played,
        };
        t.scores.insert(score.id, score.clone());
        Ok(score)
    }

    async fn update_score(&self, id: RecordId, patch: ScorePatch) -> Result<Score, StoreError> {
        let mut t = self.enter()?;
        let mut score = t
            .scores
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Score, id))?;
        if let Some(player_id) = patch.player_id {
            score.player_id = player_id;
        }
        if let Some(game_id) = patch.game_id {
            score.game_id = game_id;
        }
        if let Some(value) = patch.score {
            score.score = value;
        }
        if let Some(date_played) = patch.date_played {
            score.date_played = date_played;
        }
        t.check_refs(score.player_id, score.game_id)?;
        t.scores.insert(id, score.clone());
        Ok(score)
    }

    async fn delete_score(&self, id: RecordId) -> Result<(), StoreError> {
        self.enter()?
            .scores
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::not_found(Entity::Score, id))
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn player_scores(&self, limit: Option<i64>) -> Result<Vec<PlayerScoreRow>, StoreError> {
        let t = self.enter()?;
        let take = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(t.scores
            .values()
            .filter_map(|s| {
                Some(PlayerScoreRow {
                    name: t.players.get(&s.player_id)?.name.clone(),
                    title: t.games.get(&s.game_id)?.title.clone(),
                    score: s.score,
                })
            })
            .take(take)
            .collect())
    }

    async fn top_players(&self) -> Result<Vec<TopPlayerRow>, StoreError> {
        let t = self.enter()?;
        let mut totals: BTreeMap<RecordId, i64> = BTreeMap::new();
        for s in t.scores.values() {
            *totals.entry(s.player_id).or_default() += i64::from(s.score);
        }
        let mut rows: Vec<TopPlayerRow> = totals
            .into_iter()
            .filter_map(|(id, total_score)| {
                Some(TopPlayerRow {
                    name: t.players.get(&id)?.name.clone(),
                    total_score,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        rows.truncate(TOP_PLAYERS_LIMIT as usize);
        Ok(rows)
    }

    async fn inactive_players(&self) -> Result<Vec<PlayerNameRow>, StoreError> {
        let t = self.enter()?;
        Ok(t.players
            .values()
            .filter(|p| !t.scores.values().any(|s| s.player_id == p.id))
            .map(|p| PlayerNameRow {
                name: p.name.clone(),
            })
            .collect())
    }

    async fn popular_genre(&self) -> Result<Option<GenrePopularityRow>, StoreError> {
        let t = self.enter()?;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for s in t.scores.values() {
            if let Some(game) = t.games.get(&s.game_id) {
                *counts.entry(game.genre.clone()).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .max_by_key(|(_, n)| *n)
            .map(|(genre, times_played)| GenrePopularityRow {
                genre,
                times_played,
            }))
    }

    async fn recent_players(&self) -> Result<Vec<RecentPlayerRow>, StoreError> {
        let t = self.enter()?;
        let today = Utc::now().date_naive();
        let cutoff = today - Days::new(RECENT_PLAYER_WINDOW_DAYS as u64);
        let mut rows: Vec<RecentPlayerRow> = t
            .players
            .values()
            .filter(|p| p.join_date >= cutoff)
            .map(|p| RecentPlayerRow {
                name: p.name.clone(),
                join_date: p.join_date,
            })
            .collect();
        rows.sort_by(|a, b| b.join_date.cmp(&a.join_date));
        Ok(rows)
    }
}
