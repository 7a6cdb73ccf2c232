//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, arrondi, résultat, erreur,
//! démarche, historique) et offrir des opérations simples (C/CLR/historique)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Historique en mémoire seulement, jamais persisté.
//! - Bornes sur le dénominateur (puissances de deux, 2..=256).

use time::macros::format_description;
use time::OffsetDateTime;

use calculatrice_pieds_pouces::noyau::format::DENOMINATEUR_MAX_DEFAUT;

/// Plus petit dénominateur proposé (1/2").
pub const DENOMINATEUR_MIN: u32 = 2;

/// Garde-fou : plus grand dénominateur proposé (1/256").
pub const DENOMINATEUR_MAX: u32 = 256;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub litteraux: String,
    pub substituee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub decimal: String,
    pub note: String,
}

/// Une ligne d’historique (affichage seulement).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub horodatage: String,
    pub entree: String,
    pub sortie: String,
    pub arrondi: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrées utilisateur ---
    pub entree: String,
    pub arrondi: String, // incrément d’arrondi optionnel, ex: 1/8"

    // --- sorties ---
    pub resultat: String, // F' I N/D"
    pub erreur: String,   // message d’erreur verbatim

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- historique (plus récent en dernier) ---
    pub historique: Vec<EntreeHistorique>,

    // --- paramètres ---
    pub denominateur: u32,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            arrondi: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: Vec::new(),
            denominateur: DENOMINATEUR_MAX_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
        self.focus_entree = true;
    }

    /// Dépose une erreur ; le message va aussi dans l’historique.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.resultat.clear();
        self.demarche = Demarche::default();
        self.noter(msg.clone());
        self.erreur = msg;
        self.focus_entree = true;
    }

    /// Dépose un résultat formaté + sa démarche.
    pub fn set_resultats(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        let resultat = resultat.into();
        self.erreur.clear();
        self.demarche = demarche;
        self.noter(resultat.clone());
        self.resultat = resultat;
        self.focus_entree = true;
    }

    /// Borne à 2..=256 puis à la puissance de deux inférieure.
    pub fn set_denominateur(&mut self, d: u32) {
        let d = d.clamp(DENOMINATEUR_MIN, DENOMINATEUR_MAX);
        self.denominateur = 1 << d.ilog2();
        self.focus_entree = true;
    }

    fn noter(&mut self, sortie: String) {
        self.historique.push(EntreeHistorique {
            horodatage: horodatage(),
            entree: self.entree.trim().to_string(),
            sortie,
            arrondi: self.arrondi.trim().to_string(),
        });
    }
}

/// Heure locale HH:MM:SS (UTC si le décalage local est inconnu).
fn horodatage() -> String {
    let maintenant = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    maintenant
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}
