// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur exacte
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer sur une pile explicite (jamais de récursion : une chaîne
//   de 100 000 termes ne doit pas épuiser la pile d’appels)
//
// Règles:
// - * / lient plus fort que + -, tous associatifs à gauche
// - Signe unaire (quand on n’attend PAS une valeur):
//    - '-' devient Tok::Neg, préfixe, plus prioritaire que * / : "2 * -3" => "2 3 neg *"
//    - '+' est ignoré

use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::CalcError;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        _ => 0,
    }
}

fn syntaxe(msg: &str) -> CalcError {
    CalcError::Syntax(msg.to_string())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(12), Plus, Num(24), Star, Num(2)]
///   rpn:    [Num(12), Num(24), Num(2), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, CalcError> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le signe unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(syntaxe("deux valeurs sans opérateur entre elles"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(syntaxe("parenthèse ouvrante après une valeur"));
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(syntaxe("parenthèse fermante sans ouvrante"));
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash if !prev_was_value => {
                // signe unaire : préfixe, rien à dépiler
                match tok {
                    Tok::Minus => ops.push(Tok::Neg),
                    Tok::Plus => {}
                    _ => return Err(syntaxe("opérateur sans opérande à gauche")),
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                // dépile tant que la précédence exige de sortir l’opérateur du haut
                // (bloqué par '(')
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(syntaxe("négation inattendue")),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/* ------------------------ Évaluation RPN (pile explicite) ------------------------ */

/// Au-delà, la démarche n’affiche pas l’arbre (texte quadratique sur une longue chaîne).
pub const ARBRE_MAX_JETONS: usize = 256;

/// Contrôle d’arité : chaque opérateur trouve ses opérandes, une seule valeur à la fin.
///
/// Passe séparée : une faute de syntaxe l’emporte sur une division par zéro.
fn verifier(rpn: &[Tok]) -> Result<(), CalcError> {
    let mut hauteur = 0usize;
    for tok in rpn {
        match tok {
            Tok::Num(_) => hauteur += 1,
            Tok::Neg => {
                if hauteur == 0 {
                    return Err(syntaxe("signe sans opérande"));
                }
            }
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if hauteur < 2 {
                    return Err(syntaxe("opérateur sans opérande"));
                }
                hauteur -= 1;
            }
            Tok::LPar | Tok::RPar => return Err(syntaxe("parenthèse inattendue en RPN")),
        }
    }
    if hauteur != 1 {
        return Err(syntaxe("expression invalide"));
    }
    Ok(())
}

fn depiler<T>(st: &mut Vec<T>) -> Result<T, CalcError> {
    st.pop().ok_or_else(|| syntaxe("opérateur sans opérande"))
}

/// Évaluation exacte d’une RPN, sans récursion (profondeur quelconque).
/// Seule faute arithmétique : division par zéro.
pub fn eval_rpn(rpn: &[Tok]) -> Result<BigRational, CalcError> {
    verifier(rpn)?;

    let mut st: Vec<BigRational> = Vec::with_capacity(16);
    for tok in rpn {
        match tok {
            Tok::Num(r) => st.push(r.clone()),
            Tok::Neg => {
                let a = depiler(&mut st)?;
                st.push(-a);
            }
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = depiler(&mut st)?;
                let a = depiler(&mut st)?;
                st.push(match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => {
                        if b.is_zero() {
                            return Err(CalcError::Evaluation("division par zéro".into()));
                        }
                        a / b
                    }
                });
            }
            Tok::LPar | Tok::RPar => return Err(syntaxe("parenthèse inattendue en RPN")),
        }
    }
    depiler(&mut st)
}

/// Arbre entièrement parenthésé (démarche), ex: "((1/3)*3)", "-(1+2)".
///
/// RPN de plus de [`ARBRE_MAX_JETONS`] jetons : résumé court à la place.
pub fn arbre_rpn(rpn: &[Tok]) -> Result<String, CalcError> {
    verifier(rpn)?;
    if rpn.len() > ARBRE_MAX_JETONS {
        return Ok(format!("(arbre omis : {} jetons)", rpn.len()));
    }

    let mut st: Vec<String> = Vec::new();
    for tok in rpn {
        match tok {
            Tok::Num(r) if r.is_integer() => st.push(r.numer().to_string()),
            Tok::Num(r) => st.push(format!("{}/{}", r.numer(), r.denom())),
            Tok::Neg => {
                let a = depiler(&mut st)?;
                st.push(format!("-{a}"));
            }
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = depiler(&mut st)?;
                let a = depiler(&mut st)?;
                let op = match tok {
                    Tok::Plus => '+',
                    Tok::Minus => '-',
                    Tok::Star => '*',
                    _ => '/',
                };
                st.push(format!("({a}{op}{b})"));
            }
            Tok::LPar | Tok::RPar => return Err(syntaxe("parenthèse inattendue en RPN")),
        }
    }
    depiler(&mut st)
}
