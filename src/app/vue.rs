// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter résout (quand un champ a le focus)
// - Tactile : pavé avec ' et ", focus redonné après clic (focus_entree)
// - Historique en fin de page (plus récent en haut)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_pieds_pouces::noyau::format::increment_depuis_texte;
use calculatrice_pieds_pouces::{evaluate_with_steps, format_measurement, FormatOptions};

use super::etat::{AppCalc, Demarche, DENOMINATEUR_MAX, DENOMINATEUR_MIN};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice pieds-pouces");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Équation :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 10' 2 1/2\" + 3' 4\" * 2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        ui.add_space(4.0);

        let mut arrondi_focus = false;
        ui.horizontal(|ui| {
            ui.label("Arrondir à :");
            let r = ui.add(
                egui::TextEdit::singleline(&mut self.arrondi)
                    .desired_width(90.0)
                    .hint_text("1/8\"")
                    .id_salt("arrondi_edit")
                    .code_editor(),
            );
            arrondi_focus = r.has_focus() || r.lost_focus();

            ui.separator();

            ui.label("Précision :");
            let mut d = self.denominateur;
            egui::ComboBox::from_id_salt("denominateur_choix")
                .selected_text(format!("1/{d}\""))
                .show_ui(ui, |ui| {
                    let mut k = DENOMINATEUR_MIN;
                    while k <= DENOMINATEUR_MAX {
                        ui.selectable_value(&mut d, k, format!("1/{k}\""));
                        k *= 2;
                    }
                });
            if d != self.denominateur {
                self.set_denominateur(d);
            }
        });

        // Enter résout (champ équation ou champ arrondi)
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp.lost_focus() || arrondi_focus) {
            self.resoudre();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’équation", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface résultat + erreur + démarche", Action::ClearResultats);
            self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.resoudre();
            }
        });

        ui.add_space(8.0);

        self.ui_pave(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_pieds_pouces")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Chiffre);
                self.bouton_insert(ui, "8", "8", InsertKind::Chiffre);
                self.bouton_insert(ui, "9", "9", InsertKind::Chiffre);
                self.bouton_insert(ui, "'", "'", InsertKind::Unite);
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Chiffre);
                self.bouton_insert(ui, "5", "5", InsertKind::Chiffre);
                self.bouton_insert(ui, "6", "6", InsertKind::Chiffre);
                self.bouton_insert(ui, "\"", "\"", InsertKind::Unite);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Chiffre);
                self.bouton_insert(ui, "2", "2", InsertKind::Chiffre);
                self.bouton_insert(ui, "3", "3", InsertKind::Chiffre);
                self.bouton_insert(ui, "/", "/", InsertKind::Chiffre);
                self.bouton_insert(ui, "×", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Chiffre);
                self.bouton_insert(ui, ".", ".", InsertKind::Chiffre);
                self.bouton_insert(ui, "esp", " ", InsertKind::Chiffre);
                self.bouton_insert(ui, "( )", "(", InsertKind::Parenthese);
                self.bouton_insert(ui, "÷", "/", InsertKind::Op);
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Littéraux", "demarche_litteraux", &self.demarche.litteraux);
                Self::champ_demarche(ui, "Substituée", "demarche_substituee", &self.demarche.substituee);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(ui, "En pouces", "demarche_decimal", &self.demarche.decimal);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Historique :");
            if ui.button("Effacer l'historique").clicked() {
                self.effacer_historique();
            }
        });

        if self.historique.is_empty() {
            ui.monospace("(vide)");
            return;
        }

        egui::Grid::new("historique_grille")
            .num_columns(4)
            .striped(true)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                ui.strong("Heure");
                ui.strong("Équation");
                ui.strong("Résultat");
                ui.strong("Arrondi");
                ui.end_row();

                for h in self.historique.iter().rev() {
                    ui.monospace(&h.horodatage);
                    ui.monospace(&h.entree);
                    ui.monospace(&h.sortie);
                    ui.monospace(&h.arrondi);
                    ui.end_row();
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::Backspace => {
                    self.entree.pop();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::Chiffre => self.entree.push_str(to_insert),
            InsertKind::Unite => {
                // 10 ' -> 10'
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Parenthese => {
                // ouvrante si l’équilibre est nul, sinon fermante
                let ouvertes = self.entree.matches('(').count();
                let fermees = self.entree.matches(')').count();
                if ouvertes > fermees {
                    while self.entree.ends_with(' ') {
                        self.entree.pop();
                    }
                    self.entree.push(')');
                } else {
                    self.entree.push_str(to_insert);
                }
            }
        }

        self.focus_entree = true;
    }

    /// Résout via le noyau, puis dépose résultat + démarche (ou erreur) dans l’état UI.
    fn resoudre(&mut self) {
        let s = self.entree.trim().to_string();

        match evaluate_with_steps(&s) {
            Ok((valeur, d_noyau)) => {
                let opts = FormatOptions {
                    max_denominator: self.denominateur,
                    increment: increment_depuis_texte(&self.arrondi),
                };
                let texte = format_measurement(&valeur, &opts).to_string();
                log::info!("{s:?} = {texte}");

                let d_ui = Demarche {
                    litteraux: d_noyau.litteraux,
                    substituee: d_noyau.substituee,
                    jetons: d_noyau.jetons,
                    rpn: d_noyau.rpn,
                    arbre: d_noyau.arbre,
                    decimal: d_noyau.decimal,
                    note: d_noyau.note,
                };
                self.set_resultats(texte, d_ui);
            }
            Err(e) => {
                log::info!("{s:?} : {e}");
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Chiffre,
    Unite,
    Op,
    Parenthese,
}
