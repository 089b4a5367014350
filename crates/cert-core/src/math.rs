//! Aritmética de porcentajes sobre enteros grandes en forma de string.
//!
//! Las cantidades on-chain (unidades, precios) viajan como enteros decimales
//! arbitrariamente largos; acá se convierten a `f64` con redondeo correcto
//! para obtener porcentajes mostrables. La precisión no debe colapsar a 0
//! para razones tan chicas como 1e-17.

/// Parsea un entero decimal no negativo (sólo dígitos ASCII) a `f64`.
/// Rechaza strings vacíos, signos y valores fuera de rango de `f64`.
fn parse_unsigned_decimal(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let v: f64 = t.parse().ok()?;
    v.is_finite().then_some(v)
}

/// `100 * part / whole` como `f64`. `None` si alguno de los operandos no es
/// un entero decimal válido o si `whole` es cero.
pub fn calculate_bigint_percentage(part: &str, whole: &str) -> Option<f64> {
    let p = parse_unsigned_decimal(part)?;
    let w = parse_unsigned_decimal(whole)?;
    if w == 0.0 {
        return None;
    }
    Some(100.0 * p / w)
}

/// Costo de adquirir el 1% de una oferta: precio por unidad × unidades/100.
pub fn price_per_percent(price_per_unit: &str, total_units: &str) -> Option<f64> {
    let p = parse_unsigned_decimal(price_per_unit)?;
    let u = parse_unsigned_decimal(total_units)?;
    let v = p * (u / 100.0);
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_integers() {
        assert_eq!(calculate_bigint_percentage("-1", "10"), None);
        assert_eq!(calculate_bigint_percentage("1.5", "10"), None);
        assert_eq!(calculate_bigint_percentage("", "10"), None);
        assert_eq!(calculate_bigint_percentage("10", "0"), None);
    }

    #[test]
    fn plain_ratio() {
        assert_eq!(calculate_bigint_percentage("25", "100"), Some(25.0));
    }
}
