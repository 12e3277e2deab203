use eframe::{egui, App, CreationContext, Frame};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use workout_log::series::series_title;
use workout_log::{Category, LogError, SeriesOrder, SessionHandle, SetInput, Tracker, VolumePoint};

const LINE_COLOR: Color32 = Color32::from_rgb(135, 206, 235);

struct Notice {
    text: String,
    severe: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            severe: false,
        }
    }

    fn show(&self, ui: &mut Ui) {
        let color = if self.severe { Color32::LIGHT_RED } else { Color32::YELLOW };
        ui.colored_label(color, self.text.as_str());
    }
}

impl From<&LogError> for Notice {
    fn from(err: &LogError) -> Self {
        Notice {
            text: err.to_string(),
            severe: !err.is_user_error(),
        }
    }
}

struct SessionForm {
    category: Category,
    date: String,
    notice: Option<Notice>,
}

struct ExerciseForm {
    session: SessionHandle,
    session_label: String,
    name: String,
    sets: Vec<SetInput>,
    notice: Option<Notice>,
}

pub struct WorkoutLogApp {
    tracker: Tracker,
    selected_session: Option<SessionHandle>,
    chart_filter: Option<Category>,
    sort_by_date: bool,
    chart_title: String,
    chart: Result<Vec<VolumePoint>, String>,
    session_form: Option<SessionForm>,
    exercise_form: Option<ExerciseForm>,
    show_table: bool,
    confirm_wipe: bool,
    status: Option<Notice>,
}

impl WorkoutLogApp {
    pub fn new(cc: &CreationContext, tracker: Tracker) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(22.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let status = tracker.load_warning().map(|w| Notice {
            text: format!("{}. Starting with an empty log.", w),
            severe: true,
        });
        let mut app = WorkoutLogApp {
            tracker,
            selected_session: None,
            chart_filter: None,
            sort_by_date: false,
            chart_title: String::new(),
            chart: Ok(Vec::new()),
            session_form: None,
            exercise_form: None,
            show_table: false,
            confirm_wipe: false,
            status,
        };
        app.redraw_chart();
        app
    }

    fn redraw_chart(&mut self) {
        let order = if self.sort_by_date {
            SeriesOrder::ByDate
        } else {
            SeriesOrder::Stored
        };
        self.chart_title = series_title(self.chart_filter);
        self.chart = self
            .tracker
            .volume_series(self.chart_filter, order)
            .map_err(|err| err.to_string());
    }

    fn selected_label(&self) -> Option<String> {
        let handle = self.selected_session?;
        self.tracker.history().session(handle).ok().map(|s| s.to_string())
    }
}

impl App for WorkoutLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::right("controls")
            .min_width(300.0)
            .show(ctx, |ui| self.show_controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_chart(ui));

        self.show_session_window(ctx);
        self.show_exercise_window(ctx);
        self.show_table_window(ctx);
        self.show_wipe_window(ctx);
    }
}

impl WorkoutLogApp {
    fn show_controls(&mut self, ui: &mut Ui) {
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Add training session").clicked() {
                self.session_form = Some(SessionForm {
                    category: Category::Chest,
                    date: String::new(),
                    notice: None,
                });
            }
            if ui.button("Show table").clicked() {
                self.show_table = true;
            }
        });

        ui.separator();
        let sessions: Vec<(SessionHandle, String)> = self
            .tracker
            .history()
            .handles()
            .map(|(handle, session)| (handle, session.to_string()))
            .collect();
        let selected = self.selected_label().unwrap_or_default();
        egui::ComboBox::from_label("Session")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for (handle, label) in sessions {
                    ui.selectable_value(&mut self.selected_session, Some(handle), label);
                }
            });

        ui.horizontal(|ui| {
            if ui.button("Add exercise").clicked() {
                match (self.selected_session, self.selected_label()) {
                    (Some(session), Some(session_label)) => {
                        self.exercise_form = Some(ExerciseForm {
                            session,
                            session_label,
                            name: String::new(),
                            sets: vec![SetInput::default()],
                            notice: None,
                        });
                    }
                    _ => self.status = Some(Notice::info("Select a session first.")),
                }
            }
            if ui.button("Wipe all records").clicked() {
                self.confirm_wipe = true;
            }
        });

        ui.separator();
        let filter_text = self.chart_filter.map(|c| c.label()).unwrap_or("All");
        egui::ComboBox::from_label("Chart category")
            .selected_text(filter_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.chart_filter, None, "All");
                for category in Category::ALL {
                    ui.selectable_value(&mut self.chart_filter, Some(category), category.label());
                }
            });
        ui.checkbox(&mut self.sort_by_date, "Sort by date");
        if ui.button("Draw chart").clicked() {
            self.redraw_chart();
        }

        if let Some(status) = &self.status {
            ui.separator();
            status.show(ui);
        }
    }

    fn show_chart(&mut self, ui: &mut Ui) {
        ui.label(RichText::new(self.chart_title.as_str()).heading().strong());
        ui.add_space(10.0);
        match &self.chart {
            Ok(points) => draw_volume_chart(ui, points),
            Err(message) => {
                ui.colored_label(Color32::LIGHT_RED, message.as_str());
            }
        }
    }

    fn show_session_window(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.session_form.take() else {
            return;
        };
        let mut open = true;
        let mut saved = false;

        egui::Window::new("Add training session")
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                egui::ComboBox::from_label("Training type")
                    .selected_text(form.category.label())
                    .show_ui(ui, |ui| {
                        for category in Category::ALL {
                            ui.selectable_value(&mut form.category, category, category.label());
                        }
                    });
                ui.horizontal(|ui| {
                    ui.label("Session date (DD/MM/YYYY):");
                    ui.text_edit_singleline(&mut form.date);
                });
                if let Some(notice) = &form.notice {
                    notice.show(ui);
                }
                if ui.button("Save").clicked() {
                    match self.tracker.add_session(form.category, &form.date) {
                        Ok(handle) => {
                            self.selected_session = Some(handle);
                            saved = true;
                        }
                        Err(err) => form.notice = Some(Notice::from(&err)),
                    }
                }
            });

        if saved {
            self.status = None;
            self.redraw_chart();
        } else if open {
            self.session_form = Some(form);
        }
    }

    fn show_exercise_window(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.exercise_form.take() else {
            return;
        };
        let mut open = true;
        let mut saved = false;

        egui::Window::new(format!("Add exercise to {}", form.session_label))
            .id(egui::Id::new("add_exercise"))
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Exercise name:");
                    ui.text_edit_singleline(&mut form.name);
                });
                egui::Grid::new("set_rows").num_columns(4).show(ui, |ui| {
                    ui.label("");
                    ui.label("Sets");
                    ui.label("Reps");
                    ui.label("Weight (kg)");
                    ui.end_row();
                    for (i, row) in form.sets.iter_mut().enumerate() {
                        ui.label(format!("Set {}:", i + 1));
                        ui.add(egui::TextEdit::singleline(&mut row.sets).desired_width(60.0));
                        ui.add(egui::TextEdit::singleline(&mut row.reps).desired_width(60.0));
                        ui.add(egui::TextEdit::singleline(&mut row.weight).desired_width(80.0));
                        ui.end_row();
                    }
                });
                if let Some(notice) = &form.notice {
                    notice.show(ui);
                }
                ui.horizontal(|ui| {
                    if ui.button("Add set").clicked() {
                        form.sets.push(SetInput::default());
                    }
                    if ui.button("Save").clicked() {
                        match self.tracker.add_exercise(form.session, &form.name, &form.sets) {
                            Ok(()) => saved = true,
                            Err(err) => form.notice = Some(Notice::from(&err)),
                        }
                    }
                });
            });

        if saved {
            self.redraw_chart();
        } else if open {
            self.exercise_form = Some(form);
        }
    }

    fn show_table_window(&mut self, ctx: &egui::Context) {
        if !self.show_table {
            return;
        }
        let rows = self.tracker.tabular_view();

        egui::Window::new("Exercise table")
            .open(&mut self.show_table)
            .default_width(640.0)
            .show(ctx, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .columns(Column::auto().at_least(80.0), 6)
                    .header(22.0, |mut header| {
                        for title in ["Session", "Date", "Exercise", "Sets", "Reps", "Weight"] {
                            header.col(|ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|mut body| {
                        for row in &rows {
                            body.row(20.0, |mut cells| {
                                cells.col(|ui| {
                                    ui.label(row.category.label());
                                });
                                cells.col(|ui| {
                                    ui.label(row.date.as_str());
                                });
                                cells.col(|ui| {
                                    ui.label(row.exercise.as_str());
                                });
                                cells.col(|ui| {
                                    ui.label(row.sets.to_string());
                                });
                                cells.col(|ui| {
                                    ui.label(row.reps.to_string());
                                });
                                cells.col(|ui| {
                                    ui.label(row.weight.to_string());
                                });
                            });
                        }
                    });
            });
    }

    fn show_wipe_window(&mut self, ctx: &egui::Context) {
        if !self.confirm_wipe {
            return;
        }
        egui::Window::new("Wipe all records")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Delete every session and the saved log file?");
                ui.horizontal(|ui| {
                    if ui.button("Delete everything").clicked() {
                        self.status = self.tracker.wipe_all().err().map(|err| Notice::from(&err));
                        self.selected_session = None;
                        self.exercise_form = None;
                        self.confirm_wipe = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_wipe = false;
                    }
                });
            });
        if !self.confirm_wipe {
            self.redraw_chart();
        }
    }
}

/// Volume per session against its date, points joined in series order.
fn draw_volume_chart(ui: &mut Ui, points: &[VolumePoint]) {
    let size = egui::vec2(ui.available_width().max(240.0), 420.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let plot = response.rect.shrink(48.0);
    let axis = Stroke::new(1.0, Color32::GRAY);
    let label_font = FontId::proportional(12.0);

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_bottom(), plot.left_top()], axis);
    painter.text(
        Pos2::new(plot.center().x, response.rect.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        "Session date",
        label_font.clone(),
        Color32::GRAY,
    );
    painter.text(
        Pos2::new(plot.left(), plot.top() - 8.0),
        Align2::LEFT_BOTTOM,
        "Kg lifted",
        label_font.clone(),
        Color32::GRAY,
    );

    let (Some(first), Some(last)) = (
        points.iter().map(|p| p.date).min(),
        points.iter().map(|p| p.date).max(),
    ) else {
        painter.text(
            plot.center(),
            Align2::CENTER_CENTER,
            "No sessions recorded",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
        return;
    };

    let span_days = last.signed_duration_since(first).num_days() as f32;
    let max_volume = points.iter().map(|p| p.volume).fold(0.0_f64, f64::max).max(1.0);
    let to_screen = |point: &VolumePoint| {
        let x = if span_days > 0.0 {
            plot.left() + plot.width() * point.date.signed_duration_since(first).num_days() as f32 / span_days
        } else {
            plot.center().x
        };
        let y = plot.bottom() - plot.height() * (point.volume / max_volume) as f32;
        Pos2::new(x, y)
    };
    let screen: Vec<Pos2> = points.iter().map(to_screen).collect();

    painter.text(
        Pos2::new(plot.left() - 4.0, plot.top()),
        Align2::RIGHT_CENTER,
        format!("{:.0}", max_volume),
        label_font.clone(),
        Color32::GRAY,
    );
    painter.add(Shape::line(screen.clone(), Stroke::new(2.0, LINE_COLOR)));
    for (pos, point) in screen.iter().zip(points) {
        painter.circle_filled(*pos, 4.0, LINE_COLOR);
        painter.text(
            Pos2::new(pos.x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            point.date.format("%d/%m/%y").to_string(),
            label_font.clone(),
            Color32::GRAY,
        );
    }
}
