use std::path::PathBuf;

use relm4::{adw, gtk, main_application, Component, ComponentParts, ComponentSender, RelmWidgetExt};

use gtk::prelude::{
    ApplicationExt, BoxExt, ButtonExt, EventControllerExt, FileExt, GtkWindowExt, ObjectExt,
    OrientableExt, RangeExt, ScaleExt, WidgetExt,
};
use gtk::{gdk, glib};
use tracing::{info, warn};

use crate::config::{Config, StartupFile, POLL_INTERVAL, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::session::Session;
use crate::ui::{file_picker, time_label};
use crate::video::player::{EngineEvent, Player};

pub struct AppInit {
    pub config: Config,
    pub player: Player,
    pub video_sink: gst::Element,
}

pub struct App {
    session: Session<Player>,
    _bus_watch: Option<gst::bus::BusWatchGuard>,
}

#[derive(Debug)]
pub enum AppMsg {
    Open,
    FileChosen(Option<PathBuf>),
    Play,
    Pause,
    Stop,
    TogglePlayPause,
    SeekPressed,
    SeekReleased,
    Seek(f64),
    SetVolume(f64),
    ToggleFullscreen,
    LeaveFullscreen,
    EndOfStream,
    Quit,
}

#[derive(Debug)]
pub enum AppCmd {
    Poll,
}

#[relm4::component(pub)]
impl Component for App {
    type CommandOutput = AppCmd;
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        main_window = adw::ApplicationWindow::new(&main_application()) {
            set_visible: true,
            set_title: Some(WINDOW_TITLE),
            set_default_width: WINDOW_WIDTH,
            set_default_height: WINDOW_HEIGHT,

            connect_close_request[sender] => move |_| {
                sender.input(AppMsg::Quit);
                glib::Propagation::Stop
            },

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,

                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gdk::Key::space => sender.input(AppMsg::TogglePlayPause),
                        gdk::Key::F11 => sender.input(AppMsg::ToggleFullscreen),
                        gdk::Key::Escape => sender.input(AppMsg::LeaveFullscreen),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            adw::ToolbarView {
                add_top_bar = &adw::HeaderBar {},
                #[watch]
                set_reveal_top_bars: !model.session.is_fullscreen(),

                #[wrap(Some)]
                set_content = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,
                    #[watch]
                    set_margin_all: if model.session.is_fullscreen() { 0 } else { 8 },

                    #[name = "video_frame"]
                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_vexpand: true,
                        set_hexpand: true,
                        inline_css: "background-color: black",

                        add_controller = gtk::GestureClick {
                            connect_pressed[sender] => move |_, n_press, _, _| {
                                if n_press == 2 {
                                    sender.input(AppMsg::ToggleFullscreen);
                                }
                            }
                        },
                    },

                    gtk::Box {
                        #[watch]
                        set_visible: !model.session.is_fullscreen(),
                        set_spacing: 8,

                        #[name = "seek_scale"]
                        gtk::Scale {
                            set_hexpand: true,
                            set_draw_value: false,
                            set_range: (0.0, 0.0),
                            set_increments: (1000.0, 10000.0),

                            connect_change_value[sender] => move |_, _, value| {
                                sender.input(AppMsg::Seek(value));
                                glib::Propagation::Proceed
                            },

                            add_controller = gtk::EventControllerLegacy {
                                set_propagation_phase: gtk::PropagationPhase::Capture,

                                connect_event[sender] => move |_, event| {
                                    match event.event_type() {
                                        gdk::EventType::ButtonPress | gdk::EventType::TouchBegin => {
                                            sender.input(AppMsg::SeekPressed)
                                        }
                                        gdk::EventType::ButtonRelease
                                        | gdk::EventType::TouchEnd
                                        | gdk::EventType::TouchCancel => {
                                            sender.input(AppMsg::SeekReleased)
                                        }
                                        _ => (),
                                    }
                                    glib::Propagation::Proceed
                                }
                            },
                        },

                        #[name = "time_label"]
                        gtk::Label {
                            set_label: time_label::PLACEHOLDER,
                            add_css_class: "monospace",
                        },
                    },

                    gtk::Box {
                        #[watch]
                        set_visible: !model.session.is_fullscreen(),
                        set_spacing: 8,

                        gtk::Button {
                            set_label: "Open",
                            set_margin_end: 12,
                            connect_clicked => AppMsg::Open,
                        },

                        gtk::Button {
                            set_label: "Play",
                            connect_clicked => AppMsg::Play,
                        },

                        gtk::Button {
                            set_label: "Pause",
                            connect_clicked => AppMsg::Pause,
                        },

                        gtk::Button {
                            set_label: "Stop",
                            set_margin_end: 12,
                            connect_clicked => AppMsg::Stop,
                        },

                        gtk::Label {
                            set_label: "Volume:",
                        },

                        gtk::Scale {
                            set_hexpand: true,
                            set_draw_value: false,
                            set_range: (0.0, 100.0),
                            set_increments: (1.0, 10.0),
                            set_value: model.session.volume() as f64,
                            set_margin_end: 12,

                            connect_value_changed[sender] => move |scale| {
                                sender.input(AppMsg::SetVolume(scale.value()));
                            },
                        },

                        gtk::Button {
                            set_label: "Fullscreen",
                            connect_clicked => AppMsg::ToggleFullscreen,
                        },
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            player,
            video_sink,
        } = init;

        let bus_watch = {
            let sender = sender.clone();
            player
                .watch_bus(move |event| match event {
                    EngineEvent::EndOfStream => sender.input(AppMsg::EndOfStream),
                })
                .inspect_err(|err| warn!(%err, "engine messages will not be handled"))
                .ok()
        };

        let mut session = Session::new(player, config.volume);
        match config.startup_file {
            Some(StartupFile::Play(path)) => {
                session.open(Some(path));
            }
            Some(StartupFile::Load(path)) => session.load(path),
            None => (),
        }

        let model = App {
            session,
            _bus_watch: bus_watch,
        };

        let widgets = view_output!();

        let paintable = video_sink.property::<gdk::Paintable>("paintable");
        let picture = gtk::Picture::new();
        picture.set_paintable(Some(&paintable));
        picture.set_vexpand(true);

        let offload = gtk::GraphicsOffload::new(Some(&picture));
        offload.set_enabled(gtk::GraphicsOffloadEnabled::Enabled);
        widgets.video_frame.append(&offload);

        sender.command(|out, shutdown| {
            shutdown
                .register(async move {
                    loop {
                        tokio::time::sleep(POLL_INTERVAL).await;
                        if out.send(AppCmd::Poll).is_err() {
                            break;
                        }
                    }
                })
                .drop_on_shutdown()
        });

        ComponentParts { model, widgets }
    }

    fn update_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        message: Self::Input,
        sender: ComponentSender<Self>,
        root: &Self::Root,
    ) {
        match message {
            AppMsg::Open => {
                let dialog = file_picker::dialog(self.session.current_file());
                let window = root.clone();
                let sender = sender.clone();

                relm4::spawn_local(async move {
                    let chosen = dialog
                        .open_future(Some(&window))
                        .await
                        .ok()
                        .and_then(|file| file.path());
                    sender.input(AppMsg::FileChosen(chosen));
                });
            }
            AppMsg::FileChosen(chosen) => {
                if self.session.open(chosen) {
                    self.refresh_time(widgets);
                }
            }
            AppMsg::Play => self.session.play(),
            AppMsg::Pause => self.session.pause(),
            AppMsg::Stop => self.session.stop(),
            AppMsg::TogglePlayPause => self.session.toggle_play_pause(),
            AppMsg::SeekPressed => self.session.hold_seek(),
            AppMsg::SeekReleased => self.session.release_seek(),
            AppMsg::Seek(value) => self.session.seek(value.round() as i64),
            AppMsg::SetVolume(value) => self.session.set_volume(value.round() as i64),
            AppMsg::ToggleFullscreen => {
                let fullscreen = self.session.toggle_fullscreen();
                Self::apply_fullscreen(root, fullscreen);
            }
            AppMsg::LeaveFullscreen => {
                if self.session.leave_fullscreen() {
                    Self::apply_fullscreen(root, false);
                }
            }
            AppMsg::EndOfStream => self.session.engine_mut().mark_end_of_stream(),
            AppMsg::Quit => {
                info!("quitting");
                main_application().quit();
            }
        }

        self.update_view(widgets, sender);
    }

    fn update_cmd_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        message: Self::CommandOutput,
        sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match message {
            AppCmd::Poll => {
                let changes = self.session.sync();
                if changes.any() {
                    self.refresh_time(widgets);
                }
            }
        }

        self.update_view(widgets, sender);
    }
}

impl App {
    /// Mirrors the session's seek state and time into the widgets.
    fn refresh_time(&self, widgets: &AppWidgets) {
        let seek_bar = self.session.seek_bar();

        widgets.seek_scale.set_range(0.0, seek_bar.max() as f64);
        if !seek_bar.is_held() {
            widgets.seek_scale.set_value(seek_bar.value() as f64);
        }
        widgets.time_label.set_label(&self.session.time_label());
    }

    fn apply_fullscreen(window: &adw::ApplicationWindow, fullscreen: bool) {
        if fullscreen {
            window.fullscreen();
        } else {
            window.unfullscreen();
            window.unmaximize();
        }
    }
}
