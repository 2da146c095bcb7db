use {
    crate::{
        alphabet::{self, Alphabet},
        configuration::Configuration,
    },
    serde::Deserialize,
    std::{fmt, sync::Arc},
};

/// A prefix tree over the symbols of a fixed `Alphabet`.
///
/// Keys are byte sequences. Nodes are allocated lazily on insertion and are never freed by
/// `delete`, which only clears the terminal flag of the node a key ends at.
pub struct Trie {
    root: HeapNode,
    insertion: Insertion,
}

/// Controls what `Trie::add` leaves behind when a key contains a foreign symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insertion {
    /// Allocate nodes symbol by symbol, keeping any path built before the foreign symbol.
    Greedy,
    /// Check every symbol of the key before allocating anything.
    Strict,
}

impl Default for Insertion {
    fn default() -> Self {
        Insertion::Greedy
    }
}

impl Trie {
    pub fn new(alphabet: Arc<dyn Alphabet>) -> Self {
        Trie::with_insertion(alphabet, Insertion::default())
    }

    pub fn with_insertion(alphabet: Arc<dyn Alphabet>, insertion: Insertion) -> Self {
        Trie {
            root: new_node(alphabet),
            insertion,
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Trie::with_insertion(configuration.alphabet.alphabet(), configuration.insertion)
    }

    /// Inserts `key`, returning false if it is empty or contains a symbol outside the alphabet.
    pub fn add(&mut self, key: &[u8]) -> bool {
        if key.is_empty() {
            trace!("Rejected empty key on add");
            return false;
        }

        if self.insertion == Insertion::Strict {
            if let Some(index) = alphabet::validate(&*self.root.alphabet, key) {
                debug!(
                    "Rejected key {:?}: symbol {:?} at {} is not {}",
                    String::from_utf8_lossy(key),
                    key[index] as char,
                    index,
                    self.root.alphabet.name()
                );
                return false;
            }
        }

        let added = self.root.insert(key);
        trace!("Add {:?} -> {}", String::from_utf8_lossy(key), added);
        added
    }

    /// Returns true iff `key` was added and has not been deleted since.
    pub fn find(&self, key: &[u8]) -> bool {
        if key.is_empty() {
            return false;
        }

        let found = match self.root.search(key) {
            Some(node) => node.terminal,
            None => false,
        };
        trace!("Find {:?} -> {}", String::from_utf8_lossy(key), found);
        found
    }

    /// Unmarks `key`, returning true whenever the full path of `key` exists.
    ///
    /// Deleting a key whose path exists but which was never added (or was already deleted)
    /// still succeeds. No nodes are removed.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        if key.is_empty() {
            return false;
        }

        let deleted = match self.root.search_mut(key) {
            Some(node) => {
                node.terminal = false;
                true
            }
            None => false,
        };
        trace!("Delete {:?} -> {}", String::from_utf8_lossy(key), deleted);
        deleted
    }

    /// Number of allocated nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    pub fn alphabet(&self) -> &Arc<dyn Alphabet> {
        &self.root.alphabet
    }

    pub fn insertion(&self) -> Insertion {
        self.insertion
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Trie")
            .field("alphabet", &self.root.alphabet.name())
            .field("insertion", &self.insertion)
            .field("nodes", &self.node_count())
            .finish()
    }
}

/// Wrapper around boxed node.
type HeapNode = Box<Node>;

/// Helper function to create `HeapNode` objects (can't implement `new` for type alias).
fn new_node(alphabet: Arc<dyn Alphabet>) -> HeapNode {
    Box::new(Node::new(alphabet))
}

/// Node: Represents a tree-node in a trie.
///
/// # Fields
///
/// * `terminal` - true iff some key ends at this node.
/// * `children` - one slot per alphabet symbol, sized once on creation.
/// * `alphabet` - the alphabet shared by every node of the tree.
struct Node {
    terminal: bool,
    children: Vec<Option<HeapNode>>,
    alphabet: Arc<dyn Alphabet>,
}

impl Node {
    fn new(alphabet: Arc<dyn Alphabet>) -> Self {
        let mut children = Vec::with_capacity(alphabet.size());
        children.resize_with(alphabet.size(), || None);

        Node {
            terminal: false,
            children,
            alphabet,
        }
    }

    /// Returns the child slot for `symbol`, or `None` if this node has no slot for it.
    fn slot(&self, symbol: u8) -> Option<usize> {
        match self.alphabet.position(symbol) {
            None => {
                debug!(
                    "Symbol {:?} is not {}",
                    symbol as char,
                    self.alphabet.name()
                );
                None
            }
            Some(pos) if pos >= self.children.len() => {
                warn!(
                    "Alphabet {} mapped {:?} to slot {} of {}",
                    self.alphabet.name(),
                    symbol as char,
                    pos,
                    self.children.len()
                );
                None
            }
            Some(pos) => Some(pos),
        }
    }

    fn insert(&mut self, key: &[u8]) -> bool {
        let mut node = self;
        for &symbol in key {
            let pos = match node.slot(symbol) {
                Some(pos) => pos,
                None => return false,
            };

            if node.children[pos].is_none() {
                node.children[pos] = Some(new_node(node.alphabet.clone()));
            }

            node = match node.children[pos] {
                Some(ref mut child) => &mut **child,
                None => return false,
            };
        }

        node.terminal = true;
        true
    }

    fn search(&self, key: &[u8]) -> Option<&Node> {
        let mut node = self;
        for &symbol in key {
            let pos = node.slot(symbol)?;
            node = match node.children[pos] {
                Some(ref child) => &**child,
                None => return None,
            };
        }
        Some(node)
    }

    fn search_mut(&mut self, key: &[u8]) -> Option<&mut Node> {
        let mut node = self;
        for &symbol in key {
            let pos = node.slot(symbol)?;
            node = match node.children[pos] {
                Some(ref mut child) => &mut **child,
                None => return None,
            };
        }
        Some(node)
    }

    fn count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter().filter_map(Option::as_ref).map(|child| &**child));
        }
        count
    }
}

// Key length bounds the tree depth, so children are torn down from an explicit stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<HeapNode> = self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::alphabet::{DECIMAL, ENGLISH_ALPHA, HEXADECIMAL},
    };

    /// Maps every byte onto slot 3 of a two-slot node.
    struct Broken;

    impl Alphabet for Broken {
        fn size(&self) -> usize {
            2
        }

        fn position(&self, _symbol: u8) -> Option<usize> {
            Some(3)
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn new_trie_is_empty() {
        //setup
        let trie = Trie::new(HEXADECIMAL.clone());

        //exercise/verify
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.root.children.len(), 16);
        assert!(!trie.root.terminal);
        assert!(!trie.find(b"0"));
    }

    #[test]
    fn children_sized_by_alphabet() {
        //setup
        let mut decimal = Trie::new(DECIMAL.clone());
        let mut english = Trie::new(ENGLISH_ALPHA.clone());

        //exercise
        decimal.add(b"12");
        english.add(b"ab");

        //verify
        assert!(decimal.root.children[1]
            .as_ref()
            .map_or(false, |child| child.children.len() == 10));
        assert!(english.root.children[0]
            .as_ref()
            .map_or(false, |child| child.children.len() == 26));
    }

    #[test]
    fn nodes_share_alphabet() {
        //setup
        let mut trie = Trie::new(DECIMAL.clone());

        //exercise
        trie.add(b"7");

        //verify
        let child = trie.root.children[7].as_ref().unwrap();
        assert!(Arc::ptr_eq(&child.alphabet, &trie.root.alphabet));
        assert!(Arc::ptr_eq(trie.alphabet(), &*DECIMAL));
    }

    #[test]
    fn empty_key() {
        //setup
        let mut trie = Trie::new(ENGLISH_ALPHA.clone());

        //exercise/verify
        assert!(!trie.add(b""));
        assert!(!trie.find(b""));
        assert!(!trie.delete(b""));
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.root.terminal);
    }

    #[test]
    fn prefix_is_not_a_key() {
        //setup
        let mut trie = Trie::new(ENGLISH_ALPHA.clone());

        //exercise
        assert!(trie.add(b"abc"));

        //verify
        assert!(trie.find(b"abc"));
        assert!(!trie.find(b"ab"));
        assert!(!trie.find(b"a"));
        assert!(!trie.find(b"abcd"));
        assert_eq!(trie.node_count(), 4);
    }

    #[test]
    fn greedy_keeps_partial_path() {
        //setup
        let mut trie = Trie::new(HEXADECIMAL.clone());

        //exercise
        let res = trie.add(b"abcZ");

        //verify
        assert!(!res);
        assert_eq!(trie.node_count(), 4);
        assert!(!trie.find(b"abc"));
        assert!(trie.delete(b"abc"));
    }

    #[test]
    fn strict_allocates_nothing() {
        //setup
        let mut trie = Trie::with_insertion(HEXADECIMAL.clone(), Insertion::Strict);

        //exercise
        let res = trie.add(b"abcZ");

        //verify
        assert!(!res);
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.delete(b"abc"));
        assert!(trie.add(b"abc"));
        assert!(trie.find(b"abc"));
    }

    #[test]
    fn delete_keeps_nodes() {
        //setup
        let mut trie = Trie::new(DECIMAL.clone());
        trie.add(b"123");
        let nodes = trie.node_count();

        //exercise
        assert!(trie.delete(b"123"));

        //verify
        assert!(!trie.find(b"123"));
        assert_eq!(trie.node_count(), nodes);
        assert!(trie.add(b"123"));
        assert_eq!(trie.node_count(), nodes);
    }

    #[test]
    fn delete_missing_path() {
        //setup
        let mut trie = Trie::new(DECIMAL.clone());
        trie.add(b"12");

        //exercise/verify
        assert!(!trie.delete(b"123"));
        assert!(!trie.delete(b"2"));
        assert!(!trie.delete(b"1x"));
        assert!(trie.find(b"12"));
    }

    #[test]
    fn out_of_range_slot_is_a_miss() {
        //setup
        let mut trie = Trie::new(Arc::new(Broken));

        //exercise/verify
        assert!(!trie.add(b"a"));
        assert!(!trie.find(b"a"));
        assert!(!trie.delete(b"a"));
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn strict_rejects_out_of_range_slot() {
        //setup
        let mut trie = Trie::with_insertion(Arc::new(Broken), Insertion::Strict);

        //exercise/verify
        assert!(!trie.add(b"ab"));
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn debug_format() {
        //setup
        let mut trie = Trie::new(DECIMAL.clone());
        trie.add(b"42");

        //exercise
        let res = format!("{:?}", trie);

        //verify
        assert_eq!(
            res,
            "Trie { alphabet: \"decimal\", insertion: Greedy, nodes: 3 }"
        );
    }
}
