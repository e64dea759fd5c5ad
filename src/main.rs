use kaleido::collections::SkipList;
use kaleido::collections::TopK;
use kaleido::collections::profiling;
use kaleido::diff;

fn main() {
    let mut list = SkipList::seeded(2024);
    let values = [3, 7, 6, 9, 12, 19, 17, 26, 21, 25];
    for (i, v) in values.iter().enumerate() {
        list.insert(i as f64, *v);
    }

    println!("Skip list after insertion:");
    print!("{}", list);
    println!("------");

    for v in [19, 15] {
        // Scores are insertion positions, so look each value up by position.
        let found = values
            .iter()
            .position(|x| *x == v)
            .and_then(|i| list.search(i as f64, &v))
            .is_some();
        println!("Search for {}: {}", v, found);
    }

    list.delete(5.0, &19);
    println!("Skip list after deletion of 19:");
    print!("{}", list);
    println!("------");

    if let Some(node) = list.element_at_rank(3) {
        println!("Element at rank 3: {}", node.value());
    }
    println!("Rank of (8, 21): {}", list.rank(8.0, &21));

    let mut top = TopK::largest(3);
    top.extend(values);
    println!("Top 3 values: {:?}", top.into_sorted_vec());

    let old = ["apple", "banana", "cherry"];
    let new = ["apple", "cherry", "date"];
    print!("{}", diff::render(&diff::diff(&old, &new, diff::Algorithm::Myers), false));

    println!("{}", profiling::report());
}
