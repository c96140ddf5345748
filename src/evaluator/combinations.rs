/// Visit every `K`-element subset of `items`, preserving input order inside each subset.
///
/// Subsets are produced by a recursive choose-k, so `items.len()` choose `K` arrays are
/// handed to `visit`. Nothing is visited when there are fewer than `K` items.
pub(crate) fn for_each_subset<T: Copy, const K: usize>(items: &[T], mut visit: impl FnMut(&[T; K])) {
    if K == 0 || items.len() < K {
        return;
    }
    let mut buf = [items[0]; K];
    fill(items, 0, 0, &mut buf, &mut visit);
}

fn fill<T: Copy, const K: usize, F: FnMut(&[T; K])>(
    items: &[T],
    start: usize,
    depth: usize,
    buf: &mut [T; K],
    visit: &mut F,
) {
    if depth == K {
        visit(buf);
        return;
    }
    // Leave room for the slots still to be filled.
    for i in start..=items.len() - (K - depth) {
        buf[depth] = items[i];
        fill(items, i + 1, depth + 1, buf, visit);
    }
}

/// Binomial coefficient C(n, k).
pub const fn choose(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = if k > n - k { n - k } else { k };
    let mut acc = 1usize;
    let mut i = 0;
    while i < k {
        acc = acc * (n - i) / (i + 1);
        i += 1;
    }
    acc
}
