// src/noyau/format.rs
//
// Affichage d’un résultat numérique.
// La chaîne produite redevient le tampon de saisie (enchaînement) :
// elle doit donc rester relisible par le normaliseur et le tokenizer
// (pas de notation scientifique, pas de séparateur de milliers, pas de "-0").

pub fn format_resultat(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    // Display de f64 : plus courte écriture décimale exacte, jamais d’exposant
    format!("{x}")
}
