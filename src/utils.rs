/// Stable sort by a float key.
pub fn sort_by_float_key<T, F>(slice: &mut [T], mut f: F)
where
    F: FnMut(&T) -> f64,
{
    slice.sort_by(|a, b| f(a).total_cmp(&f(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_for_equal_keys() {
        let mut items = vec![(3.0, 'a'), (1.0, 'b'), (3.0, 'c'), (2.0, 'd')];
        sort_by_float_key(&mut items, |item| item.0);
        assert_eq!(items, vec![(1.0, 'b'), (2.0, 'd'), (3.0, 'a'), (3.0, 'c')]);
    }
}
