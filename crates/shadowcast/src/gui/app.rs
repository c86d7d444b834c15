use crate::config;
use crate::events::AppEvent;
use crate::gui::diagram::{self, CANVAS_HEIGHT, State};
use crate::gui::theme;
use gnomon::scene::{HEIGHT_RANGE, TIME_RANGE, TIME_STEP};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    SetHeight(f64),
    SetTime(f64),
    Reset,
    Quit,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn height_text(&self) -> String {
        format!("{:.0} cm", *self.state.borrow().inputs.height)
    }

    fn time_text(&self) -> String {
        self.state.borrow().scene.formatted_time.clone()
    }

    fn shadow_text(&self) -> String {
        format!("{} cm", self.state.borrow().scene.shadow_label())
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Shadow & Time Calculator"),
            set_default_size: (1100, 520),
            add_css_class: "shadowcast-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Quit);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::r | gtk::gdk::Key::R => {
                            sender.input(AppMsg::Reset);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,
                set_margin_all: 24,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_width_request: 360,
                    add_css_class: "shadowcast-panel",

                    gtk::Label {
                        set_label: "Shadow & Time Calculator",
                        set_xalign: 0.0,
                        add_css_class: "shadowcast-title",
                    },

                    gtk::Label {
                        set_label: "Adjust the person's height and time of day to see how the shadow length changes.",
                        set_xalign: 0.0,
                        set_wrap: true,
                        add_css_class: "dim-label",
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,

                        gtk::Label {
                            set_label: "Object Height",
                            set_hexpand: true,
                            set_xalign: 0.0,
                        },
                        gtk::Label {
                            #[watch]
                            set_label: &model.height_text(),
                            add_css_class: "shadowcast-value",
                        },
                    },

                    gtk::Scale::with_range(
                        gtk::Orientation::Horizontal,
                        *HEIGHT_RANGE.start(),
                        *HEIGHT_RANGE.end(),
                        1.0,
                    ) {
                        set_draw_value: false,
                        set_tooltip_text: Some("Object height slider"),
                        #[watch]
                        #[block_signal(height_handler)]
                        set_value: *model.state.borrow().inputs.height,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetHeight(scale.value()));
                        } @height_handler,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,

                        gtk::Label {
                            set_label: "Time of Day",
                            set_hexpand: true,
                            set_xalign: 0.0,
                        },
                        gtk::Label {
                            #[watch]
                            set_label: &model.time_text(),
                            add_css_class: "shadowcast-value",
                        },
                    },

                    gtk::Scale::with_range(
                        gtk::Orientation::Horizontal,
                        *TIME_RANGE.start(),
                        *TIME_RANGE.end(),
                        TIME_STEP,
                    ) {
                        set_draw_value: false,
                        set_tooltip_text: Some("Time of day slider"),
                        #[watch]
                        #[block_signal(time_handler)]
                        set_value: *model.state.borrow().inputs.time,
                        connect_value_changed[sender] => move |scale| {
                            sender.input(AppMsg::SetTime(scale.value()));
                        } @time_handler,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 8,
                        add_css_class: "shadowcast-result",

                        gtk::Label {
                            set_label: "APPROXIMATE TIME",
                            add_css_class: "shadowcast-caption",
                        },
                        gtk::Label {
                            #[watch]
                            set_label: &model.time_text(),
                            add_css_class: "shadowcast-readout",
                        },
                        gtk::Label {
                            set_label: "CALCULATED SHADOW LENGTH",
                            add_css_class: "shadowcast-caption",
                        },
                        gtk::Label {
                            #[watch]
                            set_label: &model.shadow_text(),
                            add_css_class: "shadowcast-readout",
                        },
                    },
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_height: CANVAS_HEIGHT as i32,
                    add_css_class: "shadowcast-drawing-area",
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let state = state_draw.borrow();
                let colors = state.colors();
                let layout = state.layout(width as f64, height as f64);
                if let Err(e) = diagram::draw(cr, &layout, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::SetHeight(height) => self.state.borrow_mut().set_height(height),
            AppMsg::SetTime(time) => self.state.borrow_mut().set_time(time),
            AppMsg::Reset => {
                self.state.borrow_mut().reset();
                log::info!("Inputs reset to defaults");
            }
            AppMsg::Quit => {
                relm4::main_application().quit();
                return;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.drawing_area.queue_draw();
    }
}
