// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Écran : historique (petit) au-dessus de l’affichage (grand).
// Pavé : chaque touche envoie son texte tel quel à la Session ;
// c’est le normaliseur qui se charge de ×, ÷, √, π, e, log…
//
// Note :
// - Le clavier physique est géré dans app.rs (événements globaux).
// - Pas de TextEdit : l’écran est en lecture seule, la Session est la seule source.

use eframe::egui;

use super::etat::AppCalc;

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_ecran(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_pave(ui);
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    // historique : vide => ligne blanche, pour que l’écran ne saute pas
                    let h = if self.history().is_empty() {
                        " "
                    } else {
                        self.history()
                    };
                    ui.label(egui::RichText::new(h).monospace().size(16.0).weak());

                    let mut texte = egui::RichText::new(self.display()).monospace().size(34.0);
                    if self.en_erreur() {
                        texte = texte.color(ui.visuals().error_fg_color);
                    }
                    ui.label(texte);
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let unite = self.angle_unit().label();

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, unite, "Bascule DEG / RAD", Action::Angle);
                self.bouton_insert(ui, "(", "(");
                self.bouton_insert(ui, ")", ")");
                self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Efface);
                self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
                ui.end_row();

                self.bouton_insert(ui, "sin", "sin(");
                self.bouton_insert(ui, "cos", "cos(");
                self.bouton_insert(ui, "tan", "tan(");
                self.bouton_insert(ui, "ln", "ln(");
                self.bouton_insert(ui, "log", "log(");
                ui.end_row();

                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "÷", "÷");
                self.bouton_insert(ui, "√", "√");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "×", "×");
                self.bouton_insert(ui, "xʸ", "^");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "-", "-");
                self.bouton_insert(ui, "π", "π");
                ui.end_row();

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_insert(ui, "|x|", "abs(");
                self.bouton_insert(ui, "+", "+");
                self.bouton_insert(ui, "e", "e");
                ui.end_row();
            });

        ui.add_space(6.0);

        let eq = ui.add_sized(
            [ui.available_width(), TAILLE_BOUTON[1]],
            egui::Button::new(egui::RichText::new("=").size(22.0)),
        );
        if eq.clicked() {
            self.evalue();
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized(TAILLE_BOUTON, egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Angle => self.bascule_angle(),
                Action::Efface => self.efface(),
                Action::ResetTotal => self.reset_total(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, jeton: &str) {
        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(label));
        if resp.clicked() {
            self.tape(jeton);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Angle,
    Efface,
    ResetTotal,
}
