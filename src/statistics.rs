//! Описательные статистики по колонкам с пропусками

use ndarray::Array1;

/// Значения без пропусков (и без NaN)
pub fn present_values(values: &[Option<f64>]) -> Array1<f64> {
    values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect()
}

fn sorted(values: &Array1<f64>) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Среднее без учета пропусков. `None`, если значений нет.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    present_values(values).mean()
}

/// Медиана без учета пропусков. `None`, если значений нет.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let sorted = sorted(&present_values(values));
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Квантили с линейной интерполяцией между порядковыми статистиками
pub fn quantiles(values: &Array1<f64>, probs: &[f64]) -> Option<Vec<f64>> {
    let sorted = sorted(values);
    if sorted.is_empty() {
        return None;
    }

    let last = (sorted.len() - 1) as f64;
    let result = probs
        .iter()
        .map(|&q| {
            let pos = q.clamp(0.0, 1.0) * last;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            if lo == hi {
                sorted[lo]
            } else {
                sorted[lo] + (sorted[hi] - sorted[lo]) * frac
            }
        })
        .collect();

    Some(result)
}
