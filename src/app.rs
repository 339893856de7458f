// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte à focaliser) :
// - caractère tapé   -> Session::on_token ("=" évalue)
// - Enter            -> évaluer
// - Backspace        -> effacer un caractère
// - Escape           -> effacer l’écran

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl AppCalc {
    fn clavier(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());

        for event in events {
            match event {
                egui::Event::Text(texte) => {
                    for c in texte.chars().filter(|c| !c.is_whitespace()) {
                        if c == '=' {
                            self.evalue();
                        } else {
                            let mut buf = [0u8; 4];
                            self.tape(c.encode_utf8(&mut buf));
                        }
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => {
                        self.evalue();
                    }
                    egui::Key::Backspace => self.efface(),
                    egui::Key::Escape => self.clear_entree(),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
