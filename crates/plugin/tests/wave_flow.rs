//! End-to-end wave mode scenarios against the in-memory host

use std::time::Duration;

use botwaves::{BotWaves, Difficulty, Respawn, WaveConfig};
use botwaves_host::events::{
    EventPlayerConnectFull, EventPlayerDeath, EventPlayerDisconnect, EventPlayerSpawn,
    EventPlayerTeam, EventRoundEnd, EventRoundStart,
};
use botwaves_host::{
    CommandContext, CommandInfo, GameEvent, HookResult, PluginConfig, RecordingHost, Team,
};

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    host: RecordingHost,
    waves: BotWaves,
    now: Duration,
}

impl Harness {
    fn new(config: WaveConfig) -> Self {
        let mut host = RecordingHost::new();
        let mut waves = BotWaves::new(config);
        waves.on_load(&mut host);
        Self {
            host,
            waves,
            now: Duration::ZERO,
        }
    }

    fn with_humans(config: WaveConfig, humans: i32) -> Self {
        let mut harness = Self::new(config);
        for slot in 1..=humans {
            let steam_id = 100 * slot as u64;
            harness
                .host
                .add_human(slot, steam_id, &format!("player{}", slot), Team::CounterTerrorist);
        }
        harness
    }

    fn tick(&mut self, dt: Duration) {
        self.now += dt;
        self.waves.run_frame(&mut self.host, self.now);
    }

    fn chat(&mut self, slot: i32, message: &str) -> HookResult {
        self.waves.handle_chat(&mut self.host, slot, message)
    }

    fn event(&mut self, event: GameEvent) {
        self.waves.handle_event(&mut self.host, event);
    }

    fn round_start(&mut self) {
        self.event(GameEvent::RoundStart(EventRoundStart { timelimit: 0 }));
    }

    fn round_end(&mut self, winner: Team) {
        self.event(GameEvent::RoundEnd(EventRoundEnd {
            winner,
            reason: 0,
            match_end: false,
        }));
    }

    fn death(&mut self, victim: i32, attacker: i32) {
        self.host.set_alive(victim, false);
        self.event(GameEvent::PlayerDeath(EventPlayerDeath {
            userid: victim,
            attacker,
            weapon: "ak47".to_string(),
            headshot: false,
        }));
    }

    fn disconnect(&mut self, slot: i32) {
        let player = self.host.remove_player(slot).expect("player present");
        self.event(GameEvent::PlayerDisconnect(EventPlayerDisconnect {
            userid: slot,
            steamid: player.steam_id,
            reason: 0,
            name: player.name,
            bot: player.is_bot,
        }));
    }

    fn connect(&mut self, slot: i32, steam_id: u64) {
        self.host
            .add_human(slot, steam_id, &format!("player{}", slot), Team::Spectator);
        self.event(GameEvent::PlayerConnectFull(EventPlayerConnectFull { userid: slot }));
    }

    /// Start wave mode from slot 1 and play through the restart into the first real round
    fn begin_wave(&mut self, message: &str) {
        self.chat(1, message);
        assert!(self.waves.state().active, "'{}' did not start wave mode", message);
        self.tick(Duration::from_millis(500));
        self.round_end(Team::CounterTerrorist);
        self.round_start();
        self.tick(FRAME);
    }

    fn add_bots(&mut self, count: i32) {
        for i in 0..count {
            let slot = 20 + i;
            self.host.add_bot(slot, &format!("bot{}", slot), Team::CounterTerrorist);
        }
    }
}

#[test]
fn test_lone_player_enables_instantly() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    assert_eq!(h.chat(1, "!wave"), HookResult::Continue);

    let state = h.waves.state();
    assert!(state.active);
    assert!(state.just_activated);
    assert_eq!(state.bot_count, 1);
    assert_eq!(state.difficulty, Difficulty::Easy);
    assert_eq!(
        h.host.commands,
        vec![
            "bot_quota 0",
            "bot_kick",
            "mp_autoteambalance 0",
            "mp_limitteams 0",
            "mp_teambalance_enabled 0",
            "mp_force_pick_time 0",
            "mp_warmup_end",
            "css_skill_autobalance_minplayers 30",
            "bot_join_team ct",
            "bot_quota_mode normal",
            "bot_quota 1",
        ]
    );
    assert_eq!(h.host.team_changes, vec![(1, Team::Terrorist)]);
    assert!(h.host.broadcast_contains("Wave mode enabled"));

    h.tick(Duration::from_millis(400));
    assert!(!h.host.ran("mp_restartgame 1"));
    h.tick(Duration::from_millis(100));
    assert_eq!(h.host.count_command("mp_restartgame 1"), 1);
}

#[test]
fn test_wave_configs_are_executed() {
    let config = WaveConfig {
        wave_enabled_config: "wave_on.cfg".to_string(),
        wave_disabled_config: "wave_off.cfg".to_string(),
        difficulty_easy_config: "easy.cfg".to_string(),
        difficulty_hard_config: "hard.cfg".to_string(),
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 1);

    h.chat(1, "!wave");
    assert!(h.host.ran("exec wave_on.cfg"));
    assert!(h.host.ran("exec easy.cfg"));

    h.host.clear_log();
    h.chat(1, "!dif");
    assert!(h.host.ran("exec hard.cfg"));

    h.host.clear_log();
    h.chat(1, "!wave off");
    assert!(h.host.ran("exec wave_off.cfg"));
}

#[test]
fn test_vote_needs_half_the_players() {
    let mut h = Harness::with_humans(WaveConfig::default(), 4);

    h.chat(1, "!wave");
    assert!(!h.waves.state().active);
    assert!(h.host.broadcast_contains("player1 voted to enable wave mode (1/2)."));

    h.chat(1, "!wave");
    assert!(h.host.told(1, "already voted"));
    assert!(!h.waves.state().active);

    h.chat(2, "wave");
    assert!(h.waves.state().active);
    assert_eq!(h.waves.state().bot_count, 1);
    assert!(h.waves.state().voters.is_empty());
    assert!(h.host.broadcast_contains("Vote passed! Wave mode enabled."));
}

#[test]
fn test_vote_to_disable() {
    let mut h = Harness::with_humans(WaveConfig::default(), 4);
    h.chat(1, "!wave");
    h.chat(2, "!wave");
    assert!(h.waves.state().active);
    h.host.clear_log();

    h.chat(3, "!wave");
    assert!(h.waves.state().active);
    h.chat(4, "!wave");
    assert!(!h.waves.state().active);
    assert!(h.host.broadcast_contains("Vote passed! Wave mode disabled."));
    assert!(h.host.ran("bot_kick"));
}

#[test]
fn test_bot_count_without_password_still_needs_vote() {
    let mut h = Harness::with_humans(WaveConfig::default(), 4);

    h.chat(1, "!wave 3");
    assert!(!h.waves.state().active);
    assert_eq!(h.waves.state().voters.len(), 1);
    assert!(h.host.broadcast_contains("player1 voted to enable wave mode (1/2)."));
    assert!(!h.host.ran("bot_kick"));

    h.chat(2, "!wave 3");
    assert!(h.waves.state().active);
    assert_eq!(h.waves.state().bot_count, 1);
    assert!(h.host.broadcast_contains("Vote passed! Wave mode enabled."));
}

#[test]
fn test_huge_bot_count_is_capped() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 4000000000");

    assert_eq!(h.waves.state().bot_count, 64);
    assert!(h.host.ran("mp_roundtime 3.37"));

    h.chat(1, "!wave 99999");
    assert_eq!(h.waves.state().bot_count, 64);
    assert!(h.host.broadcast_contains("Bot count changed to 64."));
}

#[test]
fn test_too_many_players_refused() {
    let mut h = Harness::with_humans(WaveConfig::default(), 6);

    h.chat(1, "!wave");
    assert!(h.host.told(1, "limited to 5 players"));
    assert!(h.waves.state().voters.is_empty());

    h.chat(1, "!wave 3");
    assert!(!h.waves.state().active);
    assert_eq!(
        h.host.chat_private.iter().filter(|(slot, _)| *slot == 1).count(),
        2
    );
}

#[test]
fn test_admin_password_lifts_limit() {
    let config = WaveConfig {
        admin_password: "secret".to_string(),
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 6);

    h.chat(1, "!wave 3 nope");
    assert!(h.host.told(1, "Wrong password"));
    assert!(!h.waves.state().active);

    h.chat(1, "!wave 3 secret");
    let state = h.waves.state();
    assert!(state.active);
    assert!(state.started_with_override);
    assert_eq!(state.bot_count, 3);
    assert!(h.host.broadcast_contains("Admin started wave mode with 3 bot(s)"));

    // Override survives newcomers
    h.connect(7, 700);
    h.tick(FRAME);
    assert!(h.waves.state().active);
}

#[test]
fn test_invalid_bot_count() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    h.chat(1, "!wave abc");
    h.chat(1, "!wave 0");
    assert!(!h.waves.state().active);
    assert_eq!(
        h.host
            .chat_private
            .iter()
            .filter(|(_, m)| m.contains("positive number"))
            .count(),
        2
    );
}

#[test]
fn test_silent_trigger_hides_chat_line() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    assert_eq!(h.chat(1, "/wave"), HookResult::Handled);
    assert!(h.waves.state().active);
    assert_eq!(h.chat(1, "!unknown"), HookResult::Continue);
    assert_eq!(h.chat(1, "/unknown"), HookResult::Continue);
}

#[test]
fn test_console_commands() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.chat(1, "!wave 4");
    assert!(h.waves.state().active);

    let info = CommandInfo::parse("css_dif", None, CommandContext::ServerConsole);
    assert_eq!(h.waves.handle_command(&mut h.host, info), HookResult::Handled);
    assert_eq!(h.waves.state().difficulty, Difficulty::Easy);

    let info = CommandInfo::parse("css_wave_off", None, CommandContext::ServerConsole);
    assert_eq!(h.waves.handle_command(&mut h.host, info), HookResult::Handled);
    assert!(!h.waves.state().active);

    let info = CommandInfo::parse("mp_restartgame 1", None, CommandContext::ServerConsole);
    assert_eq!(h.waves.handle_command(&mut h.host, info), HookResult::Continue);
}

#[test]
fn test_round_setup_adds_missing_bots() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.chat(1, "!wave 3");
    h.tick(Duration::from_millis(500));
    h.round_end(Team::CounterTerrorist);
    h.host.clear_log();

    h.round_start();
    assert!(h.host.commands.is_empty(), "setup must wait for the next frame");
    h.tick(FRAME);

    assert!(h.host.ran("mp_ignore_round_win_conditions 1"));
    assert!(h.host.ran("bot_join_team ct"));
    assert!(h.host.ran("mp_roundtime 0.67"));
    assert_eq!(h.host.count_command("bot_add_ct"), 3);
    assert_eq!(h.waves.state().players_at_round_start, 1);
    assert!(h.host.broadcast_contains("Wave of 3 bot(s) incoming!"));
}

#[test]
fn test_round_time_grows_with_bots() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 13");
    assert!(h.host.ran("mp_roundtime 0.82"));
}

#[test]
fn test_bots_capped_by_free_slots() {
    let mut h = Harness::new(WaveConfig::default());
    h.host = RecordingHost::with_max_players(10);
    h.host.add_human(1, 100, "player1", Team::Terrorist);
    h.begin_wave("!wave 20");

    assert_eq!(h.host.count_command("bot_add_ct"), 8);
    assert!(h.host.broadcast_contains("spawning 8 of 20 bots"));
    assert_eq!(h.waves.state().bot_count, 20);
}

#[test]
fn test_spawn_check_reenables_win_conditions() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");
    h.add_bots(3);
    h.host.clear_log();

    h.tick(Duration::from_secs(1));
    assert!(h.host.ran("mp_ignore_round_win_conditions 0"));
    assert!(!h.host.ran("mp_respawn_on_death_ct 1"));
    assert_eq!(h.waves.state().respawn, Respawn::Disabled);
}

#[test]
fn test_missing_bots_are_requested_again() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 5");
    h.host.clear_log();

    h.tick(Duration::from_secs(1));
    assert!(h.host.ran("bot_quota 5"));
    assert_eq!(h.waves.state().respawn, Respawn::Disabled);

    h.add_bots(2);
    h.tick(Duration::from_secs(1));
    assert_eq!(
        h.waves.state().respawn,
        Respawn::Enabled {
            remaining: 3,
            needed: 5
        }
    );
    assert!(h.host.ran("mp_respawn_on_death_ct 1"));
}

#[test]
fn test_respawns_compensate_for_spawn_points() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 5");
    h.add_bots(2);
    h.tick(Duration::from_secs(1));

    assert_eq!(
        h.waves.state().respawn,
        Respawn::Enabled {
            remaining: 3,
            needed: 5
        }
    );
    assert!(h.host.ran("mp_respawn_on_death_ct 1"));
    assert!(h.host.broadcast_contains("Only 2 of 5 bots could spawn"));

    h.host.clear_log();
    h.death(20, 1);
    assert!(h.host.broadcast_contains("2 bot respawn(s) left."));
    h.host.set_alive(20, true);
    h.death(21, 1);
    h.host.set_alive(21, true);
    h.death(20, 1);

    assert_eq!(h.waves.state().respawn, Respawn::Disabled);
    assert!(h.host.ran("mp_respawn_on_death_ct 0"));
    assert!(h.host.broadcast_contains("No more respawns"));
    assert_eq!(h.waves.state().bot_deaths, 3);
    assert_eq!(h.waves.state().kill_leader(), Some((100, 3)));
}

#[test]
fn test_first_round_after_activation_is_skipped() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.chat(1, "!wave 3");
    h.tick(Duration::from_millis(500));
    h.host.clear_log();

    h.round_end(Team::Terrorist);
    assert_eq!(h.waves.state().bot_count, 3);
    assert!(!h.waves.state().just_activated);
    assert!(!h.host.ran("bot_kick"));
}

#[test]
fn test_victory_adds_one_bot_per_player() {
    let config = WaveConfig {
        admin_password: "secret".to_string(),
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 2);
    h.begin_wave("!wave 3 secret");
    assert_eq!(h.waves.state().players_at_round_start, 2);
    h.host.clear_log();

    h.round_end(Team::Terrorist);
    assert_eq!(h.waves.state().bot_count, 5);
    assert_eq!(h.waves.state().consecutive_failures, 0);
    assert_eq!(h.host.commands, vec!["bot_kick", "bot_join_team ct", "bot_quota 5"]);
    assert!(h.host.broadcast_contains("+2 bot(s), next wave: 5."));
}

#[test]
fn test_repeated_defeats_reduce_the_wave() {
    let config = WaveConfig {
        max_failures_before_reduction: 2,
        wave_reduction_percentage: 50,
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 1);
    h.begin_wave("!wave 10");

    h.round_end(Team::CounterTerrorist);
    assert_eq!(h.waves.state().bot_count, 10);
    assert_eq!(h.waves.state().consecutive_failures, 1);

    h.round_start();
    h.tick(FRAME);
    h.round_end(Team::CounterTerrorist);
    assert_eq!(h.waves.state().bot_count, 5);
    assert_eq!(h.waves.state().consecutive_failures, 0);
    assert!(h.host.broadcast_contains("bots reduced from 10 to 5"));
    assert!(h.host.ran("bot_quota 5"));
}

#[test]
fn test_draw_leaves_wave_unchanged() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 4");
    h.host.clear_log();

    h.round_end(Team::None);
    assert_eq!(h.waves.state().bot_count, 4);
    assert_eq!(h.waves.state().consecutive_failures, 0);
    assert!(!h.host.ran("bot_kick"));
}

#[test]
fn test_changing_bot_count_while_active() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");
    h.host.clear_log();

    h.chat(1, "!wave 7");
    assert_eq!(h.waves.state().bot_count, 7);
    assert!(h.host.ran("bot_quota 7"));
    assert!(h.host.broadcast_contains("Bot count changed to 7."));

    h.tick(Duration::from_millis(300));
    assert!(h.host.ran("mp_restartgame 1"));
}

#[test]
fn test_disable_restores_server_cvars() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.host.set_cvar("mp_limitteams", "3");
    h.chat(1, "!wave");
    assert_eq!(h.waves.state().saved_cvars.len(), 6);
    h.host.clear_log();

    h.chat(1, "!wave off");
    let state = h.waves.state();
    assert!(!state.active);
    assert!(state.saved_cvars.is_empty());
    assert_eq!(
        h.host.commands.first().map(String::as_str),
        Some("mp_ignore_round_win_conditions 0")
    );
    assert!(h.host.ran("mp_limitteams 3"));
    assert!(h.host.ran("mp_autoteambalance 1"));
    assert!(h.host.ran("mp_roundtime 1.92"));
    assert_eq!(h.host.commands.last().map(String::as_str), Some("bot_quota 1"));
    assert!(h.host.broadcast_contains("Wave mode disabled."));
}

#[test]
fn test_disable_cancels_pending_restart() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.chat(1, "!wave");
    h.chat(1, "!wave off");

    h.tick(Duration::from_secs(1));
    assert!(!h.host.ran("mp_restartgame 1"));
}

#[test]
fn test_rejected_commands_do_not_abort_enable() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.host.fail_commands_matching("bot_kick");

    h.chat(1, "!wave 2");
    assert!(h.waves.state().active);
    assert!(h.host.ran("bot_quota 2"));
}

#[test]
fn test_player_limit_on_connect() {
    let mut h = Harness::with_humans(WaveConfig::default(), 5);
    for slot in 1..=3 {
        h.chat(slot, "!wave");
    }
    assert!(h.waves.state().active);

    h.connect(6, 600);
    assert!(h.waves.state().active);
    h.tick(FRAME);
    assert!(!h.waves.state().active);
    assert!(h.host.broadcast_contains("Too many players joined"));
}

#[test]
fn test_player_limit_can_be_disabled() {
    let config = WaveConfig {
        disable_on_player_limit_exceeded: false,
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 5);
    for slot in 1..=3 {
        h.chat(slot, "!wave");
    }
    assert!(h.waves.state().active);

    h.connect(6, 600);
    h.tick(FRAME);
    assert!(h.waves.state().active);
}

#[test]
fn test_last_player_leaving_disables() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");

    h.disconnect(1);
    assert!(h.waves.state().active);
    h.tick(Duration::from_millis(500));
    assert!(!h.waves.state().active);
    assert!(h.host.ran("bot_quota 1"));
}

#[test]
fn test_disconnect_completes_vote() {
    let config = WaveConfig {
        vote_threshold: 1.0,
        ..WaveConfig::default()
    };
    let mut h = Harness::with_humans(config, 3);

    h.chat(1, "!wave");
    h.chat(2, "!wave");
    assert!(!h.waves.state().active);
    assert!(h.host.broadcast_contains("(2/3)"));

    h.disconnect(3);
    h.tick(Duration::from_millis(500));
    assert!(h.waves.state().active);
    assert!(h.host.broadcast_contains("Vote passed! Wave mode enabled."));
}

#[test]
fn test_disconnect_drops_vote() {
    let mut h = Harness::with_humans(WaveConfig::default(), 4);

    h.chat(1, "!wave");
    assert_eq!(h.waves.state().voters.len(), 1);
    h.disconnect(1);
    assert!(h.waves.state().voters.is_empty());
    h.tick(Duration::from_millis(500));
    assert!(!h.waves.state().active);
}

#[test]
fn test_bots_disconnecting_are_ignored() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 2");
    h.add_bots(2);

    h.disconnect(20);
    h.tick(Duration::from_secs(1));
    assert!(h.waves.state().active);
    assert!(h.waves.state().timers.disconnect_check.is_none());
}

#[test]
fn test_team_changes_are_enforced() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 2");
    h.add_bots(1);
    h.host.clear_log();

    h.host.set_team(20, Team::Terrorist);
    h.event(GameEvent::PlayerTeam(EventPlayerTeam {
        userid: 20,
        team: Team::Terrorist,
        oldteam: Team::CounterTerrorist,
        disconnect: false,
        isbot: true,
    }));
    h.host.set_team(1, Team::CounterTerrorist);
    h.event(GameEvent::PlayerTeam(EventPlayerTeam {
        userid: 1,
        team: Team::CounterTerrorist,
        oldteam: Team::Terrorist,
        disconnect: false,
        isbot: false,
    }));
    assert!(h.host.team_changes.is_empty());

    h.tick(FRAME);
    assert!(h.host.team_changes.contains(&(20, Team::CounterTerrorist)));
    assert!(h.host.team_changes.contains(&(1, Team::Terrorist)));
}

#[test]
fn test_late_joiner_moved_on_spawn() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 2");
    h.host.clear_log();

    h.host.add_human(2, 200, "late", Team::CounterTerrorist);
    h.event(GameEvent::PlayerSpawn(EventPlayerSpawn { userid: 2 }));
    assert_eq!(h.host.team_changes, vec![(2, Team::Terrorist)]);

    // Assigned once; a later spawn does not move them again
    h.host.set_team(2, Team::CounterTerrorist);
    h.event(GameEvent::PlayerSpawn(EventPlayerSpawn { userid: 2 }));
    assert_eq!(h.host.team_changes.len(), 1);
}

#[test]
fn test_easy_mode_strips_bots() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 2");
    h.add_bots(1);

    h.event(GameEvent::PlayerSpawn(EventPlayerSpawn { userid: 20 }));
    assert!(h.host.stripped.is_empty());
    h.tick(Duration::from_millis(100));
    assert_eq!(h.host.stripped, vec![20]);

    h.chat(1, "!dif");
    assert_eq!(h.waves.state().difficulty, Difficulty::Hard);
    h.event(GameEvent::PlayerSpawn(EventPlayerSpawn { userid: 20 }));
    h.tick(Duration::from_millis(100));
    assert_eq!(h.host.stripped, vec![20]);
}

#[test]
fn test_strip_skips_dead_bot() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 2");
    h.add_bots(1);

    h.event(GameEvent::PlayerSpawn(EventPlayerSpawn { userid: 20 }));
    h.host.remove_bots();
    h.tick(Duration::from_millis(100));
    assert!(h.host.stripped.is_empty());
}

#[test]
fn test_difficulty_toggle() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    h.chat(1, "dif");
    assert!(h.host.told(1, "Wave mode is not active"));

    h.begin_wave("!wave 3");
    h.host.clear_log();
    h.chat(1, "!diff");
    assert_eq!(h.waves.state().difficulty, Difficulty::Hard);
    assert!(h.host.ran("bot_quota 0"));
    assert!(h.host.ran("bot_quota 3"));
    assert!(h.host.broadcast_contains("Difficulty: Hard"));

    h.tick(Duration::from_millis(300));
    assert!(h.host.ran("mp_restartgame 1"));

    h.chat(1, "diff");
    assert_eq!(h.waves.state().difficulty, Difficulty::Easy);
}

#[test]
fn test_filler_bot_toggle() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    h.chat(1, "!bot");
    assert!(!h.waves.state().bot_quota_enabled);
    assert!(h.host.ran("bot_quota 0"));
    assert!(h.host.broadcast_contains("Filler bots disabled."));

    h.chat(1, "bot");
    assert!(h.waves.state().bot_quota_enabled);
    assert!(h.host.ran("bot_quota 1"));

    h.chat(1, "!wave");
    h.host.clear_log();
    h.chat(1, "!bot");
    assert!(h.host.told(1, "Not available while wave mode is active"));
    assert!(h.host.commands.is_empty());
}

#[test]
fn test_filler_setting_survives_disable() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.chat(1, "!bot");
    h.chat(1, "!wave");
    h.host.clear_log();

    h.chat(1, "!wave off");
    assert_eq!(h.host.commands.last().map(String::as_str), Some("bot_quota 0"));
}

#[test]
fn test_help_message_while_inactive() {
    let mut h = Harness::with_humans(WaveConfig::default(), 2);

    h.tick(Duration::from_secs(59));
    assert!(h.host.chat_all.is_empty());
    h.tick(Duration::from_secs(1));
    assert_eq!(h.host.chat_all.len(), 3);

    h.chat(1, "!wave");
    h.chat(2, "!wave");
    assert!(h.waves.state().active);
    h.host.clear_log();
    h.tick(Duration::from_secs(60));
    assert!(!h.host.broadcast_contains("Type !wave to vote"));
}

#[test]
fn test_reload_restarts_help_timer() {
    let base = std::env::temp_dir().join(format!("botwaves-reload-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&base);
    let mut h = Harness::with_humans(WaveConfig::default(), 1);

    let faster = WaveConfig {
        help_message_interval_seconds: 10,
        ..WaveConfig::default()
    };
    faster.save(&base).unwrap();
    h.waves.reload_config(&base).unwrap();
    h.tick(Duration::from_secs(10));
    assert_eq!(h.host.chat_all.len(), 3);

    let quiet = WaveConfig {
        show_help_messages: false,
        ..WaveConfig::default()
    };
    quiet.save(&base).unwrap();
    h.waves.reload_config(&base).unwrap();
    assert!(h.waves.state().timers.help.is_none());
    h.host.clear_log();
    h.tick(Duration::from_secs(120));
    assert!(h.host.chat_all.is_empty());

    std::fs::remove_dir_all(&base).unwrap();
}

#[test]
fn test_welcome_message() {
    let mut h = Harness::new(WaveConfig::default());

    h.connect(3, 300);
    h.tick(Duration::from_secs(4));
    assert!(!h.host.told(3, "Welcome"));
    h.tick(Duration::from_secs(1));
    assert!(h.host.told(3, "Welcome player3!"));
}

#[test]
fn test_map_change_resets_wave() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");

    assert!(!h.waves.state().saved_cvars.is_empty());

    h.event(GameEvent::MapEnd);
    assert!(!h.waves.state().active);
    assert!(h.waves.state().saved_cvars.is_empty());
    assert_eq!(h.waves.scheduler().pending_timers(), 0);

    h.event(GameEvent::MapStart {
        map: "de_dust2".to_string(),
    });
    assert!(h.waves.state().timers.help.is_some());
    assert_eq!(h.waves.scheduler().pending_timers(), 1);
}

#[test]
fn test_map_start_without_map_end_resets_wave() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");
    h.host.clear_log();

    h.event(GameEvent::MapStart {
        map: "de_inferno".to_string(),
    });
    assert!(!h.waves.state().active);
    assert_eq!(h.waves.state().bot_count, 0);
    assert!(h.waves.state().saved_cvars.is_empty());
    assert!(h.host.commands.is_empty());
}

#[test]
fn test_unload_leaves_server_clean() {
    let mut h = Harness::with_humans(WaveConfig::default(), 1);
    h.begin_wave("!wave 3");
    h.host.clear_log();

    h.waves.on_unload(&mut h.host);
    assert!(!h.waves.state().active);
    assert!(h.host.ran("mp_autoteambalance 1"));
    assert_eq!(h.waves.scheduler().pending_timers(), 0);
}
