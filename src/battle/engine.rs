use crate::battle::calculators::{attack_hits, compute_damage};
use crate::battle::scaling::scaled_speed;
use crate::battle::state::{
    BattleMode, BattleRng, BattleSession, BattleStatus, LogCategory, SideState, Turn, WinnerId,
};
use crate::errors::{BattleResult, InvalidOperationError};
use crate::moves::Move;

/// The flavor line appended to a damage message, straight from the
/// effectiveness multiplier. Neutral hits get no line.
fn effectiveness_text(effectiveness: f64) -> Option<&'static str> {
    if effectiveness >= 2.0 {
        Some("It's super effective!")
    } else if effectiveness > 1.0 {
        Some("It's somewhat effective!")
    } else if effectiveness == 1.0 {
        None
    } else if effectiveness > 0.0 {
        Some("It's not very effective...")
    } else {
        Some("It has no effect...")
    }
}

impl BattleSession {
    fn side(&self, side: Turn) -> &SideState {
        match side {
            Turn::Player => &self.player,
            Turn::Opponent => &self.opponent,
        }
    }

    fn side_mut(&mut self, side: Turn) -> &mut SideState {
        match side {
            Turn::Player => &mut self.player,
            Turn::Opponent => &mut self.opponent,
        }
    }

    /// Leave setup and determine who acts first. The opponent's speed is
    /// difficulty-scaled for the comparison; ties favor the player. If
    /// the opponent is faster its first move resolves before this call
    /// returns, so control always comes back on the player's turn.
    pub fn start(&mut self, rng: &mut dyn BattleRng) -> BattleResult<()> {
        if self.status != BattleStatus::Setup {
            return Err(InvalidOperationError::AlreadyStarted.into());
        }

        let player_active = self
            .player
            .active()
            .expect("player side has an active combatant at setup");
        let opponent_active = self
            .opponent
            .active()
            .expect("opponent side has an active combatant at setup");

        let player_speed = player_active.stats.speed;
        let opponent_speed = scaled_speed(opponent_active, self.difficulty);
        let player_name = player_active.name.clone();
        let opponent_name = opponent_active.name.clone();

        self.status = BattleStatus::InProgress;
        let opener = match self.mode {
            BattleMode::Single => "Battle started!",
            BattleMode::Team => "Team Battle started!",
        };
        self.log.push(opener, LogCategory::Info);
        self.log.push(
            format!("{} faces off against {}!", player_name, opponent_name),
            LogCategory::Info,
        );

        self.whose_turn = if player_speed >= opponent_speed {
            Turn::Player
        } else {
            Turn::Opponent
        };
        let (first_name, first_speed) = match self.whose_turn {
            Turn::Player => (&player_name, player_speed),
            Turn::Opponent => (&opponent_name, opponent_speed),
        };
        // Team mode announces the deciding speed; single mode does not.
        let order_line = match self.mode {
            BattleMode::Single => format!("{} goes first!", first_name),
            BattleMode::Team => format!("{} goes first with {} speed!", first_name, first_speed),
        };
        self.log.push(order_line, LogCategory::Info);

        if self.whose_turn == Turn::Opponent {
            self.resolve_opponent_move(rng);
        }
        Ok(())
    }

    /// Resolve one full exchange: the player's chosen move, then the
    /// opponent's automated reply unless the battle ended in between.
    /// Rejected calls leave the session untouched.
    pub fn submit_player_move(
        &mut self,
        move_name: &str,
        rng: &mut dyn BattleRng,
    ) -> BattleResult<()> {
        match self.status {
            BattleStatus::Setup => return Err(InvalidOperationError::BattleNotStarted.into()),
            BattleStatus::Over => return Err(InvalidOperationError::BattleOver.into()),
            BattleStatus::InProgress => {}
        }
        if self.whose_turn != Turn::Player {
            return Err(InvalidOperationError::NotPlayersTurn.into());
        }

        let chosen = self
            .player
            .active()
            .and_then(|c| c.move_named(move_name))
            .cloned()
            .ok_or_else(|| InvalidOperationError::UnknownMove(move_name.to_string()))?;

        self.resolve_attack(Turn::Player, &chosen, rng);

        if self.status == BattleStatus::InProgress {
            self.whose_turn = Turn::Opponent;
            self.resolve_opponent_move(rng);
        }
        Ok(())
    }

    /// The AI side picks uniformly among its active combatant's moves;
    /// there is no strategy beyond the random choice.
    fn resolve_opponent_move(&mut self, rng: &mut dyn BattleRng) {
        let active = self
            .opponent
            .active()
            .expect("opponent side has an active combatant on its turn");
        let count = active.moves.len();
        let pick = ((rng.next("opponent move choice") * count as f64).floor() as usize)
            .min(count.saturating_sub(1));
        let chosen = active.moves[pick].clone();

        self.resolve_attack(Turn::Opponent, &chosen, rng);

        if self.status == BattleStatus::InProgress {
            self.whose_turn = Turn::Player;
        }
    }

    /// One attack from `attacker` against the other side's active
    /// combatant: accuracy, damage, HP, stats, and any resulting faint,
    /// defeat, or roster switch.
    fn resolve_attack(&mut self, attacker: Turn, attack: &Move, rng: &mut dyn BattleRng) {
        let attacking = self
            .side(attacker)
            .active()
            .expect("attacking side has an active combatant")
            .clone();
        let defending = self
            .side(attacker.other())
            .active()
            .expect("defending side has an active combatant")
            .clone();

        if !attack_hits(attack.accuracy, rng) {
            self.log.push(
                format!("{}'s {} missed!", attacking.name, attack.name),
                LogCategory::Warning,
            );
            return;
        }

        let outcome = compute_damage(&attacking, &defending, attack, rng);

        self.log.push(
            format!("{} used {}!", attacking.name, attack.name),
            LogCategory::Attack,
        );

        let fainted = self
            .side_mut(attacker.other())
            .active_mut()
            .expect("defending side has an active combatant")
            .take_damage(outcome.damage);

        if attacker == Turn::Player {
            self.stats.total_damage_dealt += outcome.damage;
            if outcome.is_critical {
                self.stats.critical_hits += 1;
            }
            if outcome.effectiveness > 1.0 {
                self.stats.super_effective_hits += 1;
            }
        }

        let mut damage_message = format!("Dealt {} damage to {}!", outcome.damage, defending.name);
        if outcome.is_critical {
            damage_message.push_str(" Critical hit!");
        }
        if let Some(flavor) = effectiveness_text(outcome.effectiveness) {
            damage_message.push(' ');
            damage_message.push_str(flavor);
        }
        let damage_category = if outcome.effectiveness > 1.0 {
            match attacker {
                Turn::Player => LogCategory::Success,
                Turn::Opponent => LogCategory::Error,
            }
        } else if outcome.effectiveness < 1.0 {
            LogCategory::Warning
        } else {
            LogCategory::Info
        };
        self.log.push(damage_message, damage_category);

        if fainted {
            self.handle_faint(attacker, &defending.name);
        }
    }

    /// The defender's active combatant just hit zero HP. In single mode
    /// that decides the battle; in team mode the roster advances, the
    /// replacement enters at full HP, and the battle only ends when the
    /// roster is exhausted.
    fn handle_faint(&mut self, attacker: Turn, defender_name: &str) {
        let faint_category = match attacker {
            Turn::Player => LogCategory::Success,
            Turn::Opponent => LogCategory::Error,
        };
        self.log.push(
            format!("{} fainted!", defender_name),
            faint_category,
        );

        if self.mode == BattleMode::Single {
            self.end_battle(attacker);
            return;
        }

        if attacker == Turn::Player {
            self.stats.pokemon_fainted += 1;
        }

        let defender = attacker.other();
        match self.side_mut(defender).roster.advance_on_faint() {
            None => self.end_battle(attacker),
            Some(index) => {
                let side = self.side_mut(defender);
                let replacement = &mut side.members[index];
                replacement.restore_full();
                let replacement_name = replacement.name.clone();
                let sendout = match defender {
                    Turn::Opponent => format!("Opponent sends out {}!", replacement_name),
                    Turn::Player => format!("You send out {}!", replacement_name),
                };
                self.log.push(sendout, LogCategory::Info);
            }
        }
    }

    /// Terminal transition. Once entered, the session only hands out
    /// read access; every later submission is rejected unchanged.
    fn end_battle(&mut self, victor: Turn) {
        self.status = BattleStatus::Over;

        let side = self.side(victor);
        let name = side.display_name();
        let (winner_id, banner) = match &side.tag {
            Some(tag) => (
                WinnerId::Team(tag.id.clone()),
                format!("Team {} wins the battle!", name),
            ),
            None => (
                WinnerId::Combatant(side.members[0].id),
                format!("{} wins the battle!", name),
            ),
        };
        self.victor = Some(winner_id);
        self.log.push(banner, LogCategory::Success);

        if self.mode == BattleMode::Single {
            self.stats.pokemon_fainted += 1;
        }
    }
}
