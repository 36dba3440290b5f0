use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use rank_map::ConcurrentRankMap;

const THREADS: u32 = 10;
const OPS_PER_THREAD: u32 = 1_000;

/// Hammers one shared map from several threads with a disjoint key range
/// each, then checks the final picture against what each thread left
/// behind.
#[test]
fn concurrent_writers_with_disjoint_keys() {
    let map: Arc<ConcurrentRankMap<u32, u64>> = Arc::new(ConcurrentRankMap::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let base = t * OPS_PER_THREAD;
                for i in 0..OPS_PER_THREAD {
                    let key = base + i;
                    map.insert(key, u64::from(key));
                    // Interleave reads so shared and exclusive locking mix.
                    let _ = map.rank_of(&key);
                    let _ = map.get_by_rank(1 + (i as usize % 50));
                    if i % 3 == 0 {
                        map.remove(&key);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Each thread removed every key where i % 3 == 0.
    let survivors_per_thread = (0..OPS_PER_THREAD).filter(|i| i % 3 != 0).count();
    assert_eq!(map.len(), survivors_per_thread * THREADS as usize);

    for t in 0..THREADS {
        let base = t * OPS_PER_THREAD;
        assert!(!map.contains_key(&base));
        assert_eq!(map.get(&(base + 1)), Some(u64::from(base + 1)));
    }

    // The whole leaderboard is still sorted by value.
    let all = map.range_by_rank(0, map.len());
    let mut values: Vec<u64> = all.iter().map(|&(_, v)| v).collect();
    let sorted = {
        let mut s = values.clone();
        s.sort_unstable();
        s
    };
    assert_eq!(values.len(), map.len());
    assert_eq!(values, sorted);
    values.dedup();
    assert_eq!(values.len(), map.len(), "disjoint keys mapped to distinct values");
}

/// Readers racing a writer always observe a coherent snapshot: a rank
/// query never sees a half-applied mutation.
#[test]
fn readers_see_coherent_snapshots() {
    let map: Arc<ConcurrentRankMap<u32, u32>> = Arc::new(ConcurrentRankMap::new());
    for i in 0..100 {
        map.insert(i, i);
    }

    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for round in 0..50u32 {
                for i in 0..100 {
                    map.insert(i, i + round * 100);
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = map.range_by_rank(0, map.len());
                    let values: Vec<u32> = snapshot.iter().map(|&(_, v)| v).collect();
                    let mut sorted = values.clone();
                    sorted.sort_unstable();
                    assert_eq!(values, sorted, "snapshot out of rank order");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // Every key ends at its final round's value.
    assert_eq!(map.len(), 100);
    for i in 0..100 {
        assert_eq!(map.get(&i), Some(i + 49 * 100));
    }
}
