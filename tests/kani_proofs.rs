//! Kani verification proofs for the Fibonacci heap
//!
//! Kani is AWS's model checker for Rust. These harnesses check small heaps
//! exhaustively over symbolic keys.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use arena_fibonacci_heap::{FibonacciHeap, HeapError};

/// Proof that insert always increments the length
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_increments_len() {
    let mut heap: FibonacciHeap<u8, u8> = FibonacciHeap::new();
    heap.insert(kani::any(), kani::any());
    let before = heap.len();

    heap.insert(kani::any(), kani::any());

    assert!(heap.len() == before + 1);
}

/// Proof that the minimum is never larger than any inserted key
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_minimum_is_smallest() {
    let mut heap: FibonacciHeap<u8, ()> = FibonacciHeap::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    heap.insert(a, ());
    heap.insert(b, ());
    heap.insert(c, ());

    let Some((&min, _)) = heap.minimum() else {
        panic!("heap with three elements has a minimum");
    };
    assert!(min <= a && min <= b && min <= c);
}

/// Proof that extracting three elements yields them in order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_extract_order() {
    let mut heap: FibonacciHeap<u8, ()> = FibonacciHeap::new();
    for _ in 0..3 {
        heap.insert(kani::any(), ());
    }

    let (first, _) = heap.extract_min().unwrap();
    let (second, _) = heap.extract_min().unwrap();
    let (third, _) = heap.extract_min().unwrap();
    assert!(first <= second && second <= third);
    assert!(heap.extract_min() == Err(HeapError::EmptyHeap));
}

/// Proof that a rejected decrease_key leaves the element untouched
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_rejected_decrease_is_noop() {
    let mut heap: FibonacciHeap<u8, ()> = FibonacciHeap::new();
    let key: u8 = kani::any();
    let new_key: u8 = kani::any();
    kani::assume(new_key > key);

    let h = heap.insert(key, ());
    assert!(heap.decrease_key(&h, new_key) == Err(HeapError::InvalidKey));
    assert!(heap.get(&h) == Some((&key, &())));
}

/// Proof that handles go stale once their element is extracted
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_extracted_handle_is_invalid() {
    let mut heap: FibonacciHeap<u8, ()> = FibonacciHeap::new();
    let h = heap.insert(kani::any(), ());
    heap.extract_min().unwrap();

    assert!(heap.decrease_key(&h, 0) == Err(HeapError::InvalidHandle));
}
