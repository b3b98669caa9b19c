//! Audio plugin: music tracks and one-shot sound effects.
//!
//! Every handle is optional. The headless configuration never loads any,
//! so every playback site degrades to a no-op; the full app fills the
//! table at startup. Gameplay code only ever emits [`PlaySfx`] and
//! [`MusicCmd`] messages and stays unaware of whether anything is audible.

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::common::messages::{MusicCmd, PlaySfx, Sfx};
use crate::common::settings::SettingsStore;
use crate::common::state::GameState;

/// Handle table. `None` means the clip is unconfigured and the effect is
/// skipped silently.
#[derive(Resource, Debug, Default)]
pub struct AudioHandles {
    pub menu_music: Option<Handle<AudioSource>>,
    pub game_music: Option<Handle<AudioSource>>,
    pub jump: Option<Handle<AudioSource>>,
    pub lane_change: Option<Handle<AudioSource>>,
    pub obstacle_hit: Option<Handle<AudioSource>>,
    pub coin_pickup: Option<Handle<AudioSource>>,
    pub power_up_pickup: Option<Handle<AudioSource>>,
    pub chaser_alert: Option<Handle<AudioSource>>,
    pub new_record: Option<Handle<AudioSource>>,
}

impl AudioHandles {
    fn clip(&self, sfx: Sfx) -> Option<&Handle<AudioSource>> {
        match sfx {
            Sfx::Jump => self.jump.as_ref(),
            Sfx::LaneChange => self.lane_change.as_ref(),
            Sfx::ObstacleHit => self.obstacle_hit.as_ref(),
            Sfx::CoinPickup => self.coin_pickup.as_ref(),
            Sfx::PowerUpPickup => self.power_up_pickup.as_ref(),
            Sfx::ChaserAlert => self.chaser_alert.as_ref(),
            Sfx::NewRecord => self.new_record.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Menu,
    Game,
}

/// Marker on the looping music entity for the named track.
#[derive(Component, Debug)]
pub struct MusicTrack(pub Track);

pub fn plugin(app: &mut App) {
    app.init_resource::<AudioHandles>();

    app.add_systems(OnEnter(GameState::MainMenu), start_menu_music);
    app.add_systems(OnEnter(GameState::InGame), start_game_music);

    app.add_systems(
        Update,
        (
            handle_music_cmds,
            play_sfx,
            sync_volumes.run_if(resource_changed::<SettingsStore>),
        ),
    );
}

/// Fill the handle table from disk. Only the full app registers this.
pub fn load_handles(app: &mut App) {
    app.add_systems(Startup, load_all);
}

fn load_all(server: Res<AssetServer>, mut handles: ResMut<AudioHandles>) {
    handles.menu_music = Some(server.load("audio/menu_music.ogg"));
    handles.game_music = Some(server.load("audio/game_music.ogg"));
    handles.jump = Some(server.load("audio/jump.ogg"));
    handles.lane_change = Some(server.load("audio/lane_change.ogg"));
    handles.obstacle_hit = Some(server.load("audio/obstacle_hit.ogg"));
    handles.coin_pickup = Some(server.load("audio/coin_pickup.ogg"));
    handles.power_up_pickup = Some(server.load("audio/power_up_pickup.ogg"));
    handles.chaser_alert = Some(server.load("audio/chaser_alert.ogg"));
    handles.new_record = Some(server.load("audio/new_record.ogg"));
}

fn start_menu_music(
    mut commands: Commands,
    handles: Res<AudioHandles>,
    store: Res<SettingsStore>,
    q_tracks: Query<Entity, With<MusicTrack>>,
) {
    for e in &q_tracks {
        commands.entity(e).despawn();
    }
    let Some(clip) = handles.menu_music.clone() else {
        return;
    };
    commands.spawn((
        Name::new("Music(Menu)"),
        MusicTrack(Track::Menu),
        AudioPlayer(clip),
        PlaybackSettings {
            volume: Volume::Linear(store.current.menu_volume),
            ..PlaybackSettings::LOOP
        },
    ));
}

fn start_game_music(
    mut commands: Commands,
    handles: Res<AudioHandles>,
    store: Res<SettingsStore>,
    q_tracks: Query<Entity, With<MusicTrack>>,
) {
    for e in &q_tracks {
        commands.entity(e).despawn();
    }
    let Some(clip) = handles.game_music.clone() else {
        return;
    };
    commands.spawn((
        Name::new("Music(Game)"),
        MusicTrack(Track::Game),
        AudioPlayer(clip),
        PlaybackSettings {
            volume: Volume::Linear(store.current.game_volume),
            ..PlaybackSettings::LOOP
        },
    ));
}

fn handle_music_cmds(
    mut commands: Commands,
    mut cmds: MessageReader<MusicCmd>,
    q_tracks: Query<(Entity, &MusicTrack, Option<&AudioSink>)>,
) {
    for cmd in cmds.read() {
        for (e, track, sink) in &q_tracks {
            if track.0 != Track::Game {
                continue;
            }
            match cmd {
                MusicCmd::StopGame => commands.entity(e).despawn(),
                MusicCmd::PauseGame => {
                    if let Some(sink) = sink {
                        sink.pause();
                    }
                }
                MusicCmd::ResumeGame => {
                    if let Some(sink) = sink {
                        sink.play();
                    }
                }
            }
        }
    }
}

fn play_sfx(
    mut commands: Commands,
    mut requests: MessageReader<PlaySfx>,
    handles: Res<AudioHandles>,
    store: Res<SettingsStore>,
) {
    for req in requests.read() {
        let Some(clip) = handles.clip(req.0) else {
            continue;
        };
        commands.spawn((
            Name::new("Sfx"),
            AudioPlayer(clip.clone()),
            PlaybackSettings {
                volume: Volume::Linear(store.current.game_volume),
                ..PlaybackSettings::DESPAWN
            },
        ));
    }
}

/// Push volume changes to whichever track is currently audible.
fn sync_volumes(store: Res<SettingsStore>, mut q_tracks: Query<(&MusicTrack, &mut AudioSink)>) {
    for (track, mut sink) in &mut q_tracks {
        let volume = match track.0 {
            Track::Menu => store.current.menu_volume,
            Track::Game => store.current.game_volume,
        };
        sink.set_volume(Volume::Linear(volume));
    }
}
